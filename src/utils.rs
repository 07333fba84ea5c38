use iso8601::Date;
use xml::escape::{escape_str_attribute, escape_str_pcdata};

use std::borrow::Cow;

/// Escape a string for use as XML characters.
///
/// The resulting string is *not* suitable for use in XML attributes, use `escape_attribute` there.
pub fn escape_xml(s: &str) -> Cow<str> {
    escape_str_pcdata(s)
}

pub fn escape_attribute(s: &str) -> Cow<str> {
    escape_str_attribute(s)
}

/// Parses the `YYYY-MM-DD` dates the panel reports, such as `cr_date`.
pub fn parse_date(s: &str) -> Option<Date> {
    iso8601::date(s.trim()).ok()
}
