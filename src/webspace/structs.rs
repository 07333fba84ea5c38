//! Structs returned by the webspace operator.

use crate::error::ParseError;
use crate::parser::{Element, ParseResult};
use crate::structs::{
    optional_text, optional_value, required_text, required_value, FromElement, PropertyInfo,
};
use crate::utils::parse_date;

use iso8601::Date;

use std::collections::BTreeMap;

/// The object created or updated by `add`/`set`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Info {
    pub id: u32,
    /// Empty when the panel does not report one, as in `set` results.
    pub guid: String,
}

impl FromElement for Info {
    fn from_element(element: &Element) -> ParseResult<Self> {
        Ok(Info {
            id: required_value(element, "id", "integer")?,
            guid: optional_text(element, "guid").unwrap_or_default(),
        })
    }
}

/// The `gen_info` dataset of a webspace.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneralInfo {
    /// Taken from the enclosing result.
    pub id: Option<u32>,
    pub name: String,
    pub guid: String,
    pub creation_date: Option<Date>,
    /// Punycode form of `name`.
    pub ascii_name: Option<String>,
    pub status: Option<u32>,
    pub real_size: Option<u64>,
    pub description: Option<String>,
}

impl FromElement for GeneralInfo {
    fn from_element(element: &Element) -> ParseResult<Self> {
        let creation_date = match element.child("cr_date") {
            Some(date) => Some(parse_date(date.text()).ok_or_else(|| ParseError::InvalidValue {
                for_type: "date",
                element: "cr_date".to_string(),
                found: date.text().to_string(),
            })?),
            None => None,
        };

        Ok(GeneralInfo {
            id: None,
            name: required_text(element, "name")?,
            guid: required_text(element, "guid")?,
            creation_date,
            ascii_name: optional_text(element, "ascii-name"),
            status: optional_value(element, "status", "integer")?,
            real_size: optional_value(element, "real_size", "integer")?,
            description: optional_text(element, "description"),
        })
    }

    fn assign_id(&mut self, id: u32) {
        self.id = Some(id);
    }
}

/// The `disk_usage` dataset of a webspace, in bytes per area.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiskUsage {
    /// Taken from the enclosing result.
    pub id: Option<u32>,
    pub httpdocs: u64,
    pub httpsdocs: u64,
    pub subdomains: u64,
    pub anonftp: u64,
    pub logs: u64,
    pub dbases: u64,
    pub mailboxes: u64,
    pub maillists: u64,
    pub domaindumps: u64,
    pub configs: u64,
    pub chroot: u64,
}

impl FromElement for DiskUsage {
    fn from_element(element: &Element) -> ParseResult<Self> {
        let size = |name: &str| -> ParseResult<u64> {
            Ok(optional_value(element, name, "integer")?.unwrap_or(0))
        };

        Ok(DiskUsage {
            id: None,
            httpdocs: size("httpdocs")?,
            httpsdocs: size("httpsdocs")?,
            subdomains: size("subdomains")?,
            anonftp: size("anonftp")?,
            logs: size("logs")?,
            dbases: size("dbases")?,
            mailboxes: size("mailboxes")?,
            maillists: size("maillists")?,
            domaindumps: size("domaindumps")?,
            configs: size("configs")?,
            chroot: size("chroot")?,
        })
    }

    fn assign_id(&mut self, id: u32) {
        self.id = Some(id);
    }
}

/// PHP settings of a webspace, read from a full response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PhpSettings {
    pub properties: BTreeMap<String, String>,
}

impl FromElement for PhpSettings {
    fn from_element(element: &Element) -> ParseResult<Self> {
        let settings = element
            .path(&["webspace", "get", "result", "data", "php-settings"])
            .ok_or_else(|| ParseError::MissingElement {
                parent: element.name().to_string(),
                expected: "php-settings".to_string(),
            })?;

        let mut properties = BTreeMap::new();
        for setting in settings.children_named("setting") {
            properties.insert(
                required_text(setting, "name")?,
                optional_text(setting, "value").unwrap_or_default(),
            );
        }

        Ok(PhpSettings { properties })
    }
}

fn read_descriptor(element: &Element) -> ParseResult<BTreeMap<String, PropertyInfo>> {
    let descriptor = element.expect_child("descriptor")?;

    let mut properties = BTreeMap::new();
    for property in descriptor.children_named("property") {
        let info = PropertyInfo::from_element(property)?;
        properties.insert(info.name.clone(), info);
    }
    Ok(properties)
}

/// The permissions a webspace can be granted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PermissionDescriptor {
    pub permissions: BTreeMap<String, PropertyInfo>,
}

impl FromElement for PermissionDescriptor {
    fn from_element(element: &Element) -> ParseResult<Self> {
        Ok(PermissionDescriptor {
            permissions: read_descriptor(element)?,
        })
    }
}

/// The limits a webspace can be given.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LimitDescriptor {
    pub limits: BTreeMap<String, PropertyInfo>,
}

impl FromElement for LimitDescriptor {
    fn from_element(element: &Element) -> ParseResult<Self> {
        Ok(LimitDescriptor {
            limits: read_descriptor(element)?,
        })
    }
}

/// The physical hosting settings of a webspace.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PhysicalHostingDescriptor {
    pub properties: BTreeMap<String, PropertyInfo>,
}

impl FromElement for PhysicalHostingDescriptor {
    fn from_element(element: &Element) -> ParseResult<Self> {
        Ok(PhysicalHostingDescriptor {
            properties: read_descriptor(element)?,
        })
    }
}
