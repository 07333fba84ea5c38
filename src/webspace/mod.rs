//! The webspace (subscription) operator.

mod structs;

pub use self::structs::{
    DiskUsage, GeneralInfo, Info, LimitDescriptor, PermissionDescriptor, PhpSettings,
    PhysicalHostingDescriptor,
};

use crate::client::{Client, ResponseMode};
use crate::error::Error;
use crate::operator::{Filter, Operator};
use crate::packet::Node;
use crate::structs::FromElement;
use crate::{Properties, Transport, Value};

/// The property groups `Webspace::update` can change.
///
/// A group left at `None` is not sent. A group set to an empty mapping is sent as an empty
/// section, and it is up to the panel to accept or reject it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WebspaceUpdate {
    /// `gen_setup`
    pub general: Option<Properties>,
    /// `limits`
    pub limits: Option<Properties>,
    /// `prefs`
    pub preferences: Option<Properties>,
    /// `hosting`
    pub hosting: Option<Properties>,
    /// `disk_usage`
    pub disk_usage: Option<Properties>,
    /// `performance`
    pub performance: Option<Properties>,
    /// `permissions`
    pub permissions: Option<Properties>,
    /// `php-settings`
    pub php_settings: Option<Properties>,
    /// `mail`
    pub mail: Option<Properties>,
}

impl WebspaceUpdate {
    pub fn new() -> Self {
        WebspaceUpdate::default()
    }

    pub fn general(mut self, properties: Properties) -> Self {
        self.general = Some(properties);
        self
    }

    pub fn limits(mut self, properties: Properties) -> Self {
        self.limits = Some(properties);
        self
    }

    pub fn preferences(mut self, properties: Properties) -> Self {
        self.preferences = Some(properties);
        self
    }

    pub fn hosting(mut self, properties: Properties) -> Self {
        self.hosting = Some(properties);
        self
    }

    pub fn disk_usage(mut self, properties: Properties) -> Self {
        self.disk_usage = Some(properties);
        self
    }

    pub fn performance(mut self, properties: Properties) -> Self {
        self.performance = Some(properties);
        self
    }

    pub fn permissions(mut self, properties: Properties) -> Self {
        self.permissions = Some(properties);
        self
    }

    pub fn php_settings(mut self, properties: Properties) -> Self {
        self.php_settings = Some(properties);
        self
    }

    pub fn mail(mut self, properties: Properties) -> Self {
        self.mail = Some(properties);
        self
    }

    /// The groups paired with their section names, in the order they are written.
    fn sections(&self) -> [(&'static str, Option<&Properties>); 9] {
        [
            ("gen_setup", self.general.as_ref()),
            ("limits", self.limits.as_ref()),
            ("prefs", self.preferences.as_ref()),
            ("hosting", self.hosting.as_ref()),
            ("disk_usage", self.disk_usage.as_ref()),
            ("performance", self.performance.as_ref()),
            ("permissions", self.permissions.as_ref()),
            ("php-settings", self.php_settings.as_ref()),
            ("mail", self.mail.as_ref()),
        ]
    }
}

/// Manages webspaces (subscriptions).
///
/// Obtained from [`Client::webspace`](struct.Client.html#method.webspace).
#[derive(Debug)]
pub struct Webspace<'a, T> {
    operator: Operator<'a, T>,
}

impl<'a, T: Transport> Webspace<'a, T> {
    pub(crate) fn new(client: &'a Client<T>) -> Self {
        Webspace {
            operator: Operator::new(client, "webspace"),
        }
    }

    /// Lists the permissions a webspace can be granted.
    pub fn get_permission_descriptor(&self) -> Result<PermissionDescriptor, Error> {
        let response = self
            .operator
            .request("get-permission-descriptor.filter", ResponseMode::Short)?;
        Ok(PermissionDescriptor::from_element(&response)?)
    }

    /// Lists the limits a webspace can be given.
    pub fn get_limit_descriptor(&self) -> Result<LimitDescriptor, Error> {
        let response = self
            .operator
            .request("get-limit-descriptor.filter", ResponseMode::Short)?;
        Ok(LimitDescriptor::from_element(&response)?)
    }

    /// Lists the physical hosting settings of a webspace.
    pub fn get_physical_hosting_descriptor(&self) -> Result<PhysicalHostingDescriptor, Error> {
        let response = self
            .operator
            .request("get-physical-hosting-descriptor.filter", ResponseMode::Short)?;
        Ok(PhysicalHostingDescriptor::from_element(&response)?)
    }

    /// Returns the PHP settings of the webspace matching `field` = `value`.
    pub fn get_php_settings<V: Into<Value>>(
        &self,
        field: &str,
        value: V,
    ) -> Result<PhpSettings, Error> {
        let filter = Filter::by(field, value);
        let packet = self.operator.packet("get", |get| {
            filter.write_to(get);
            get.add_child("dataset").add_child("php-settings");
        });

        let response = self.operator.client().request(&packet, ResponseMode::Full)?;
        Ok(PhpSettings::from_element(&response)?)
    }

    /// Creates a webspace.
    ///
    /// `properties` become the `gen_setup` section. Hosting properties are sent as
    /// `<property><name/><value/></property>` pairs below `hosting/vrt_hst`, followed by a copy of
    /// the `ip_address` property when one is given. `plan_name` selects a service plan. An empty
    /// hosting mapping or plan name is left out of the packet.
    pub fn create(
        &self,
        properties: &Properties,
        hosting_properties: Option<&Properties>,
        plan_name: Option<&str>,
    ) -> Result<Info, Error> {
        let packet = self.operator.packet("add", |add| {
            add.add_child("gen_setup").add_properties(properties);

            let hosting_properties = hosting_properties.filter(|hosting| !hosting.is_empty());
            if let Some(hosting_properties) = hosting_properties {
                let vrt_hst = add.add_child("hosting").add_child("vrt_hst");
                for (name, value) in hosting_properties.iter() {
                    let property = vrt_hst.add_child("property");
                    property.add_text_child("name", name);
                    property.add_text_child("value", value.clone());
                }
                if let Some(ip_address) = properties.get("ip_address") {
                    vrt_hst.add_text_child("ip_address", ip_address.clone());
                }
            }

            if let Some(plan_name) = plan_name.filter(|name| !name.is_empty()) {
                add.add_text_child("plan-name", plan_name);
            }
        });

        let response = self.operator.client().request(&packet, ResponseMode::Short)?;
        Ok(Info::from_element(&response)?)
    }

    /// Changes the webspaces matching `filter`.
    ///
    /// Each group present in `update` is written as its own section below `values`, with its
    /// entries as direct child elements.
    pub fn update(&self, filter: &Filter, update: &WebspaceUpdate) -> Result<Info, Error> {
        let packet = self.operator.packet("set", |set| {
            filter.write_to(set);
            let values = set.add_child("values");
            for (section, properties) in update.sections().iter() {
                if let Some(properties) = properties {
                    add_section(values, section, properties);
                }
            }
        });

        let response = self.operator.client().request(&packet, ResponseMode::Short)?;
        Ok(Info::from_element(&response)?)
    }

    /// Deletes the webspaces matching `field` = `value`.
    pub fn delete<V: Into<Value>>(&self, field: &str, value: V) -> Result<bool, Error> {
        self.operator.delete_by(field, value, "del")
    }

    /// Returns the general information of the webspace matching `field` = `value`, or `None`.
    pub fn get<V: Into<Value>>(
        &self,
        field: &str,
        value: V,
    ) -> Result<Option<GeneralInfo>, Error> {
        let items = self
            .operator
            .get_items::<GeneralInfo>("gen_info", &Filter::by(field, value))?;
        Ok(items.into_iter().next())
    }

    /// Returns the general information of every webspace.
    pub fn get_all(&self) -> Result<Vec<GeneralInfo>, Error> {
        self.operator.get_items("gen_info", &Filter::All)
    }

    /// Returns the disk usage of the webspace matching `field` = `value`, or `None`.
    pub fn get_disk_usage<V: Into<Value>>(
        &self,
        field: &str,
        value: V,
    ) -> Result<Option<DiskUsage>, Error> {
        let items = self
            .operator
            .get_items::<DiskUsage>("disk_usage", &Filter::by(field, value))?;
        Ok(items.into_iter().next())
    }
}

fn add_section(values: &mut Node, section: &str, properties: &Properties) {
    values.add_child(section).add_properties(properties);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::Packet;
    use crate::parser::Element;
    use crate::transport::mock::MockTransport;

    const ADD_OK: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<packet version="1.6.9.1">
  <webspace>
    <add>
      <result>
        <status>ok</status>
        <id>12</id>
        <guid>a9f1c3a2-6f5e-4dd2-9f3a-0a6d8f4c1b7e</guid>
      </result>
    </add>
  </webspace>
</packet>"##;

    const SET_OK: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<packet><webspace><set><result><status>ok</status><filter-id>12</filter-id><id>12</id></result></set></webspace></packet>"##;

    const GET_TWO: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<packet version="1.6.9.1">
  <webspace>
    <get>
      <result>
        <status>ok</status>
        <id>1</id>
        <data>
          <gen_info>
            <cr_date>2019-05-14</cr_date>
            <name>example.com</name>
            <guid>f0e1d2c3</guid>
          </gen_info>
        </data>
      </result>
      <result>
        <status>ok</status>
        <id>2</id>
        <data>
          <gen_info>
            <name>example.net</name>
            <guid>a1b2c3d4</guid>
          </gen_info>
        </data>
      </result>
    </get>
  </webspace>
</packet>"##;

    const GET_NONE: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<packet><webspace><get><result><status>ok</status><filter-id>missing.example</filter-id></result></get></webspace></packet>"##;

    const DISK_USAGE: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<packet>
  <webspace>
    <get>
      <result>
        <status>ok</status>
        <id>7</id>
        <data>
          <disk_usage>
            <httpdocs>40960</httpdocs>
            <dbases>1024</dbases>
            <mailboxes>8</mailboxes>
          </disk_usage>
        </data>
      </result>
    </get>
  </webspace>
</packet>"##;

    const PHP_SETTINGS: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<packet>
  <webspace>
    <get>
      <result>
        <status>ok</status>
        <id>7</id>
        <data>
          <php-settings>
            <setting><name>memory_limit</name><value>128M</value></setting>
            <setting><name>safe_mode</name><value>off</value></setting>
          </php-settings>
        </data>
      </result>
    </get>
  </webspace>
</packet>"##;

    const PERMISSION_DESCRIPTOR: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<packet>
  <webspace>
    <get-permission-descriptor>
      <result>
        <status>ok</status>
        <descriptor>
          <property><name>manage_dns</name><type>boolean</type><label>DNS zone management</label></property>
          <property><name>manage_crontab</name><type>boolean</type><label>Scheduling tasks</label></property>
        </descriptor>
      </result>
    </get-permission-descriptor>
  </webspace>
</packet>"##;

    const DEL_OK: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<packet><webspace><del><result><status>ok</status><filter-id>example.com</filter-id><id>12</id></result></del></webspace></packet>"##;

    fn client(mock: MockTransport) -> Client<MockTransport> {
        Client::with_transport(mock, Some("1.6.9.1"))
    }

    /// Reads the captured packet back through the response parser.
    fn sent_document(packet: &Packet) -> Element {
        crate::parser::parse_document(&mut packet.to_xml_string().as_bytes()).unwrap()
    }

    fn child_names(element: &Element) -> Vec<&str> {
        element.children().iter().map(Element::name).collect()
    }

    #[test]
    fn create_writes_general_setup_only() {
        let client = client(MockTransport::new().respond(ADD_OK));
        let properties = Properties::new()
            .with("name", "example.com")
            .with("ip_address", "10.0.0.1")
            .with("owner-id", 3);

        let info = client.webspace().create(&properties, None, None).unwrap();
        assert_eq!(info.id, 12);
        assert_eq!(info.guid, "a9f1c3a2-6f5e-4dd2-9f3a-0a6d8f4c1b7e");

        let sent = sent_document(&client.transport().last_sent());
        let add = sent.path(&["webspace", "add"]).unwrap();
        assert_eq!(child_names(add), ["gen_setup"]);

        let gen_setup = add.child("gen_setup").unwrap();
        assert_eq!(child_names(gen_setup), ["name", "ip_address", "owner-id"]);
        assert_eq!(gen_setup.child_text("name"), Some("example.com"));
        assert_eq!(gen_setup.child_text("owner-id"), Some("3"));
    }

    #[test]
    fn create_encodes_hosting_as_name_value_pairs() {
        let client = client(MockTransport::new().respond(ADD_OK));
        let properties = Properties::new()
            .with("name", "example.com")
            .with("ip_address", "10.0.0.1");
        let hosting = Properties::new()
            .with("disk_space", "1000")
            .with("ftp_login", "ftpuser");

        client
            .webspace()
            .create(&properties, Some(&hosting), Some("Unlimited"))
            .unwrap();

        let sent = sent_document(&client.transport().last_sent());
        let add = sent.path(&["webspace", "add"]).unwrap();
        assert_eq!(child_names(add), ["gen_setup", "hosting", "plan-name"]);
        assert_eq!(add.child_text("plan-name"), Some("Unlimited"));

        let vrt_hst = add.path(&["hosting", "vrt_hst"]).unwrap();
        assert_eq!(child_names(vrt_hst), ["property", "property", "ip_address"]);

        let first = &vrt_hst.children()[0];
        assert_eq!(first.child_text("name"), Some("disk_space"));
        assert_eq!(first.child_text("value"), Some("1000"));
        assert_eq!(vrt_hst.child_text("ip_address"), Some("10.0.0.1"));
    }

    #[test]
    fn create_without_ip_address_omits_hosting_copy() {
        let client = client(MockTransport::new().respond(ADD_OK));
        let properties = Properties::from([("name", "example.com")]);
        let hosting = Properties::from([("disk_space", 1000)]);

        client.webspace().create(&properties, Some(&hosting), None).unwrap();

        let sent = sent_document(&client.transport().last_sent());
        let vrt_hst = sent.path(&["webspace", "add", "hosting", "vrt_hst"]).unwrap();
        assert_eq!(child_names(vrt_hst), ["property"]);
        // integers are written as-is
        assert_eq!(vrt_hst.children()[0].child_text("value"), Some("1000"));
    }

    #[test]
    fn create_skips_empty_hosting_and_plan_name() {
        let client = client(MockTransport::new().respond(ADD_OK));
        let properties = Properties::new()
            .with("name", "example.com")
            .with("ip_address", "10.0.0.1");

        client
            .webspace()
            .create(&properties, Some(&Properties::new()), Some(""))
            .unwrap();

        let sent = sent_document(&client.transport().last_sent());
        let add = sent.path(&["webspace", "add"]).unwrap();
        assert_eq!(child_names(add), ["gen_setup"]);
    }

    #[test]
    fn update_accepts_result_without_guid() {
        let client = client(MockTransport::new().respond(
            "<packet><webspace><set><result><status>ok</status>\
             <filter-id>example.com</filter-id><id>12</id></result></set></webspace></packet>",
        ));
        let update = WebspaceUpdate::new().general(Properties::from([("status", 0)]));

        let info = client
            .webspace()
            .update(&Filter::by("name", "example.com"), &update)
            .unwrap();
        assert_eq!(info, Info { id: 12, guid: String::new() });
    }

    #[test]
    fn update_writes_present_sections_in_order() {
        let client = client(MockTransport::new().respond(SET_OK));
        let update = WebspaceUpdate::new()
            .mail(Properties::from([("webmail", "roundcube")]))
            .general(Properties::from([("status", 16)]))
            .hosting(Properties::from([("ftp_password", "s3cret")]))
            .limits(Properties::new().with("disk_space", 1.5).with("max_site", 10));

        let info = client
            .webspace()
            .update(&Filter::by("name", "example.com"), &update)
            .unwrap();
        assert_eq!(info.id, 12);
        assert_eq!(info.guid, "");

        let sent = sent_document(&client.transport().last_sent());
        let set = sent.path(&["webspace", "set"]).unwrap();
        assert_eq!(child_names(set), ["filter", "values"]);
        assert_eq!(set.path(&["filter", "name"]).map(Element::text), Some("example.com"));

        let values = set.child("values").unwrap();
        assert_eq!(child_names(values), ["gen_setup", "limits", "hosting", "mail"]);
        // hosting entries are direct children here, unlike in `create`
        assert_eq!(values.path(&["hosting", "ftp_password"]).map(Element::text), Some("s3cret"));
        assert_eq!(values.path(&["limits", "disk_space"]).map(Element::text), Some("1.5"));
        assert_eq!(values.path(&["limits", "max_site"]).map(Element::text), Some("10"));
    }

    #[test]
    fn update_sends_empty_groups_and_all_filter() {
        let client = client(MockTransport::new().respond(SET_OK));
        let update = WebspaceUpdate::new().permissions(Properties::new());

        client.webspace().update(&Filter::All, &update).unwrap();

        let sent = sent_document(&client.transport().last_sent());
        let set = sent.path(&["webspace", "set"]).unwrap();
        assert_eq!(set.child("filter").map(|f| f.children().len()), Some(0));

        let values = set.child("values").unwrap();
        assert_eq!(child_names(values), ["permissions"]);
        assert!(values.child("permissions").unwrap().children().is_empty());
    }

    #[test]
    fn update_section_names() {
        let all = Properties::from([("x", "1")]);
        let update = WebspaceUpdate::new()
            .general(all.clone())
            .limits(all.clone())
            .preferences(all.clone())
            .hosting(all.clone())
            .disk_usage(all.clone())
            .performance(all.clone())
            .permissions(all.clone())
            .php_settings(all.clone())
            .mail(all);
        let client = client(MockTransport::new().respond(SET_OK));

        client.webspace().update(&Filter::by("id", 12), &update).unwrap();

        let sent = sent_document(&client.transport().last_sent());
        let values = sent.path(&["webspace", "set", "values"]).unwrap();
        assert_eq!(
            child_names(values),
            [
                "gen_setup",
                "limits",
                "prefs",
                "hosting",
                "disk_usage",
                "performance",
                "permissions",
                "php-settings",
                "mail"
            ]
        );
    }

    #[test]
    fn delete_filters_by_field() {
        let client = client(MockTransport::new().respond(DEL_OK));

        assert!(client.webspace().delete("name", "example.com").unwrap());

        let sent = sent_document(&client.transport().last_sent());
        let filter = sent.path(&["webspace", "del", "filter"]).unwrap();
        assert_eq!(child_names(filter), ["name"]);
        assert_eq!(filter.child_text("name"), Some("example.com"));
    }

    #[test]
    fn delete_reports_unexpected_status() {
        let client = client(MockTransport::new().respond(
            "<packet><webspace><del><result><status>pending</status></result></del></webspace></packet>",
        ));

        assert!(!client.webspace().delete("id", 12).unwrap());
    }

    #[test]
    fn delete_raises_panel_errors() {
        let client = client(MockTransport::new().respond(
            "<packet><webspace><del><result><status>error</status><errcode>1013</errcode>\
             <errtext>Webspace does not exist</errtext></result></del></webspace></packet>",
        ));

        let err = client.webspace().delete("id", 99).unwrap_err();
        assert_eq!(err.fault().map(|fault| fault.code()), Some(1013));
    }

    #[test]
    fn get_returns_first_item() {
        let client = client(MockTransport::new().respond(GET_TWO));

        let info = client.webspace().get("name", "example.com").unwrap().unwrap();
        assert_eq!(info.id, Some(1));
        assert_eq!(info.name, "example.com");

        let sent = sent_document(&client.transport().last_sent());
        let get = sent.path(&["webspace", "get"]).unwrap();
        assert_eq!(get.path(&["filter", "name"]).map(Element::text), Some("example.com"));
        assert!(get.path(&["dataset", "gen_info"]).is_some());
    }

    #[test]
    fn get_without_match_is_none() {
        let client = client(MockTransport::new().respond(GET_NONE));

        assert_eq!(client.webspace().get("name", "missing.example").unwrap(), None);
    }

    #[test]
    fn get_all_sends_empty_filter() {
        let client = client(MockTransport::new().respond(GET_TWO));

        let all = client.webspace().get_all().unwrap();
        let names: Vec<&str> = all.iter().map(|info| info.name.as_str()).collect();
        assert_eq!(names, ["example.com", "example.net"]);
        assert_eq!(all[1].id, Some(2));

        let sent = sent_document(&client.transport().last_sent());
        let filter = sent.path(&["webspace", "get", "filter"]).unwrap();
        assert!(filter.children().is_empty());
    }

    #[test]
    fn get_disk_usage_reads_dataset() {
        let client = client(MockTransport::new().respond(DISK_USAGE));

        let usage = client.webspace().get_disk_usage("id", 7).unwrap().unwrap();
        assert_eq!(usage.id, Some(7));
        assert_eq!(usage.httpdocs, 40960);
        assert_eq!(usage.dbases, 1024);
        assert_eq!(usage.logs, 0);

        let sent = sent_document(&client.transport().last_sent());
        assert_eq!(sent.path(&["webspace", "get", "filter", "id"]).map(Element::text), Some("7"));
        assert!(sent.path(&["webspace", "get", "dataset", "disk_usage"]).is_some());
    }

    #[test]
    fn get_php_settings_reads_full_response() {
        let client = client(MockTransport::new().respond(PHP_SETTINGS));

        let settings = client.webspace().get_php_settings("id", 7).unwrap();
        assert_eq!(settings.properties.len(), 2);
        assert_eq!(settings.properties["memory_limit"], "128M");

        let sent = sent_document(&client.transport().last_sent());
        let get = sent.path(&["webspace", "get"]).unwrap();
        assert_eq!(child_names(get), ["filter", "dataset"]);
        assert!(get.path(&["dataset", "php-settings"]).is_some());
    }

    #[test]
    fn get_permission_descriptor_sends_fixed_filter() {
        let client = client(MockTransport::new().respond(PERMISSION_DESCRIPTOR));

        let descriptor = client.webspace().get_permission_descriptor().unwrap();
        assert_eq!(descriptor.permissions.len(), 2);
        assert_eq!(descriptor.permissions["manage_dns"].property_type, "boolean");

        let sent = client.transport().last_sent();
        assert!(sent
            .to_xml_string()
            .ends_with("<webspace><get-permission-descriptor><filter/></get-permission-descriptor></webspace></packet>"));
        assert_eq!(sent.version(), Some("1.6.9.1"));
    }

    #[test]
    fn descriptor_requests_use_their_operation() {
        let response = |operation: &str| {
            format!(
                "<packet><webspace><{op}><result><status>ok</status><descriptor>\
                 <property><name>p</name><type>string</type><label>P</label></property>\
                 </descriptor></result></{op}></webspace></packet>",
                op = operation
            )
        };
        let client = client(
            MockTransport::new()
                .respond(&response("get-limit-descriptor"))
                .respond(&response("get-physical-hosting-descriptor")),
        );

        assert!(client.webspace().get_limit_descriptor().unwrap().limits.contains_key("p"));
        assert!(client
            .webspace()
            .get_physical_hosting_descriptor()
            .unwrap()
            .properties
            .contains_key("p"));

        let operations: Vec<String> = client
            .transport()
            .sent()
            .iter()
            .map(|packet| packet.operation().1.to_string())
            .collect();
        assert_eq!(operations, ["get-limit-descriptor", "get-physical-hosting-descriptor"]);
    }
}
