//! Plumbing shared by all operators.

use crate::client::{Client, ResponseMode};
use crate::error::Error;
use crate::packet::Node;
use crate::parser::Element;
use crate::structs::FromElement;
use crate::{Packet, Transport, Value};

use log::debug;

/// Selects the objects an operation targets.
#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    /// An empty `<filter/>`, matching every object.
    All,
    /// A single `<field>value</field>` pair, e.g. `name` or `id`.
    Field { name: String, value: Value },
}

impl Filter {
    pub fn by<N: Into<String>, V: Into<Value>>(name: N, value: V) -> Self {
        Filter::Field {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Appends the `<filter>` element to `parent`.
    pub fn write_to(&self, parent: &mut Node) {
        let filter = parent.add_child("filter");
        if let Filter::Field { ref name, ref value } = *self {
            filter.add_text_child(name, value.clone());
        }
    }
}

/// An operator bound to its wrapper tag, e.g. `webspace`.
#[derive(Debug)]
pub struct Operator<'a, T> {
    client: &'a Client<T>,
    wrapper_tag: &'static str,
}

impl<'a, T: Transport> Operator<'a, T> {
    pub fn new(client: &'a Client<T>, wrapper_tag: &'static str) -> Self {
        Operator {
            client,
            wrapper_tag,
        }
    }

    pub fn client(&self) -> &'a Client<T> {
        self.client
    }

    pub fn wrapper_tag(&self) -> &'static str {
        self.wrapper_tag
    }

    /// Builds a packet holding `<wrapper><operation/></wrapper>` and lets `fill` populate the
    /// operation element.
    pub fn packet<F: FnOnce(&mut Node)>(&self, operation: &str, fill: F) -> Packet {
        let mut packet = self.client.packet();
        fill(packet
            .root_mut()
            .add_child(self.wrapper_tag)
            .add_child(operation));
        packet
    }

    /// Sends a short syntax path relative to the wrapper tag.
    pub fn request(&self, path: &str, mode: ResponseMode) -> Result<Element, Error> {
        self.client
            .request_path(&format!("{}.{}", self.wrapper_tag, path), mode)
    }

    /// Deletes the objects matching `field` = `value` using the operation `method`.
    ///
    /// Returns whether the panel reported `ok`.
    pub fn delete_by<V: Into<Value>>(
        &self,
        field: &str,
        value: V,
        method: &str,
    ) -> Result<bool, Error> {
        let filter = Filter::by(field, value);
        let packet = self.packet(method, |operation| filter.write_to(operation));

        let result = self.client.request(&packet, ResponseMode::Short)?;
        Ok(result.child_text("status") == Some("ok"))
    }

    /// Fetches the `info_tag` dataset of every object matching `filter`.
    ///
    /// Results without the requested dataset are skipped. The id of each result is handed to the
    /// struct through `FromElement::assign_id`.
    pub fn get_items<S: FromElement>(
        &self,
        info_tag: &str,
        filter: &Filter,
    ) -> Result<Vec<S>, Error> {
        let packet = self.packet("get", |get| {
            filter.write_to(get);
            get.add_child("dataset").add_child(info_tag);
        });

        let response = self.client.request(&packet, ResponseMode::Full)?;

        let mut items = Vec::new();
        for result in response.descendants("result") {
            let data = match result.path(&["data", info_tag]) {
                Some(data) => data,
                None => continue,
            };
            let mut item = S::from_element(data)?;
            if let Some(id) = result.child_text("id").and_then(|id| id.trim().parse().ok()) {
                item.assign_id(id);
            }
            items.push(item);
        }
        debug!("{}.get {}: {} item(s)", self.wrapper_tag, info_tag, items.len());

        Ok(items)
    }
}
