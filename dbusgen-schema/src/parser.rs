//! D-Bus introspection XML parser.
//!
//! This module turns introspection documents into [`Interface`] values,
//! decoding every argument and property signature on the way.

use crate::error::SchemaError;
use crate::types::{Access, Annotation, Arg, Interface, Method, Node, Property, Signal};
use crate::validation::{validate_interface_name, validate_member_name};
use crate::xml::{Element, read_document};
use dbusgen_core::{Type, decode_one};
use tracing::{debug, trace};

/// Parses an introspection document from a string.
///
/// # Arguments
/// * `xml` - Introspection XML with a root `node` element
///
/// # Returns
/// Interfaces of the root node followed by those declared inline on nested
/// nodes, parents before children.
///
/// # Errors
/// Returns `SchemaError` if the XML is malformed, required attributes are
/// missing or invalid, or a signature cannot be decoded.
pub fn parse_introspection(xml: &str) -> Result<Vec<Interface>, SchemaError> {
    let root = read_document(xml)?;
    parse_document(&root)
}

/// Parses an introspection document from raw bytes.
///
/// # Errors
/// Returns `SchemaError::Utf8` for non UTF-8 input, otherwise the same
/// errors as [`parse_introspection`].
pub fn parse_bytes(bytes: &[u8]) -> Result<Vec<Interface>, SchemaError> {
    parse_introspection(std::str::from_utf8(bytes)?)
}

/// Parses an already read document tree.
///
/// # Errors
/// Returns `SchemaError` if the root is not a `node` or any interface in
/// the tree is invalid.
pub fn parse_document(root: &Element) -> Result<Vec<Interface>, SchemaError> {
    Ok(parse_node(root)?.into_interfaces())
}

/// Parses a `node` element and its nested nodes.
///
/// # Errors
/// Returns `SchemaError` if `element` is not a `node` or any interface in
/// the tree is invalid.
pub fn parse_node(element: &Element) -> Result<Node, SchemaError> {
    if element.name != "node" {
        return Err(SchemaError::structure(format!(
            "expected <node> element, found <{}>",
            element.name
        )));
    }

    let mut node = Node {
        name: element.attr("name").map(str::to_string),
        ..Node::default()
    };

    for child in &element.children {
        match child.name.as_str() {
            "interface" => node.interfaces.push(parse_interface(child)?),
            "node" => node.children.push(parse_node(child)?),
            other => trace!(element = other, "skipping element in <node>"),
        }
    }

    debug!(
        node = node.name.as_deref().unwrap_or(""),
        interfaces = node.interfaces.len(),
        children = node.children.len(),
        "parsed node"
    );

    Ok(node)
}

/// Parses an interface element.
fn parse_interface(element: &Element) -> Result<Interface, SchemaError> {
    let name = element.required_attr("name")?;
    validate_interface_name(name)?;

    let mut iface = Interface::new(name);
    let path = format!("interface {name}");

    for child in &element.children {
        match child.name.as_str() {
            "method" => iface.methods.push(parse_method(child, &path)?),
            "property" => iface.properties.push(parse_property(child, &path)?),
            "signal" => iface.signals.push(parse_signal(child, &path)?),
            "annotation" => iface.annotations.push(parse_annotation(child)?),
            other => trace!(element = other, "skipping element in <interface>"),
        }
    }

    Ok(iface)
}

/// Parses a method element, splitting its arguments by direction.
fn parse_method(element: &Element, parent: &str) -> Result<Method, SchemaError> {
    let name = element.required_attr("name")?;
    validate_member_name("method", name)?;
    let mut method = Method::new(name);
    let path = format!("{parent} / method {name}");

    for (index, child) in element.children_named("arg").enumerate() {
        let arg = parse_arg(child, &path, index)?;
        match child.attr("direction").unwrap_or("in") {
            "in" => method.in_args.push(arg),
            "out" => method.out_args.push(arg),
            other => return Err(SchemaError::invalid_attr("arg", "direction", other)),
        }
    }
    for child in element.children_named("annotation") {
        method.annotations.push(parse_annotation(child)?);
    }

    Ok(method)
}

/// Parses a property element.
fn parse_property(element: &Element, parent: &str) -> Result<Property, SchemaError> {
    let name = element.required_attr("name")?;
    validate_member_name("property", name)?;
    let signature = element.required_attr("type")?;
    let mode = element.required_attr("access")?;

    let access = Access::from_flags(mode.contains("read"), mode.contains("write"))
        .ok_or_else(|| SchemaError::invalid_attr("property", "access", mode))?;
    let ty = decode(signature, || format!("{parent} / property {name}"))?;

    let mut property = Property::new(name, ty, access);
    for child in element.children_named("annotation") {
        property.annotations.push(parse_annotation(child)?);
    }

    Ok(property)
}

/// Parses a signal element. Signal arguments have no direction.
fn parse_signal(element: &Element, parent: &str) -> Result<Signal, SchemaError> {
    let name = element.required_attr("name")?;
    validate_member_name("signal", name)?;
    let mut signal = Signal::new(name);
    let path = format!("{parent} / signal {name}");

    for (index, child) in element.children_named("arg").enumerate() {
        signal.args.push(parse_arg(child, &path, index)?);
    }
    for child in element.children_named("annotation") {
        signal.annotations.push(parse_annotation(child)?);
    }

    Ok(signal)
}

/// Parses an arg element. Its signature must hold exactly one type.
fn parse_arg(element: &Element, parent: &str, index: usize) -> Result<Arg, SchemaError> {
    let name = element.attr("name").unwrap_or_default();
    let signature = element.required_attr("type")?;

    let ty = decode(signature, || {
        if name.is_empty() {
            format!("{parent} / arg #{index}")
        } else {
            format!("{parent} / arg {name}")
        }
    })?;

    Ok(Arg::new(name, ty))
}

fn parse_annotation(element: &Element) -> Result<Annotation, SchemaError> {
    Ok(Annotation::new(
        element.required_attr("name")?,
        element.required_attr("value")?,
    ))
}

fn decode(signature: &str, path: impl FnOnce() -> String) -> Result<Type, SchemaError> {
    decode_one(signature).map_err(|source| SchemaError::Signature {
        path: path(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Annotated;
    use dbusgen_core::{Primitive, SignatureErrorKind};

    const BLUEZ: &str = r#"<!DOCTYPE node PUBLIC "-//freedesktop//DTD D-BUS Object Introspection 1.0//EN"
"http://www.freedesktop.org/standards/dbus/1.0/introspect.dtd">
<node>
  <interface name="org.bluez.Adapter1">
    <method name="StartDiscovery"></method>
    <method name="RemoveDevice">
      <arg name="device" type="o" direction="in"/>
    </method>
    <method name="GetDiscoveryFilters">
      <arg name="filters" type="as" direction="out"/>
    </method>
    <method name="SetDiscoveryFilter">
      <arg name="properties" type="a{sv}"/>
      <annotation name="org.freedesktop.DBus.Method.NoReply" value="true"/>
    </method>
    <property name="Address" type="s" access="read"></property>
    <property name="Alias" type="s" access="readwrite"></property>
    <property name="Powered" type="b" access="readwrite">
      <annotation name="org.freedesktop.DBus.Deprecated" value="true"/>
    </property>
  </interface>
  <interface name="org.freedesktop.DBus.Properties">
    <signal name="PropertiesChanged">
      <arg type="s" name="interface_name"/>
      <arg type="a{sv}" name="changed_properties"/>
      <arg type="as" name="invalidated_properties"/>
    </signal>
  </interface>
  <node name="hci0"/>
</node>"#;

    #[test]
    fn test_parse_interfaces_in_order() {
        let ifaces = parse_introspection(BLUEZ).expect("Failed to parse introspection");
        let names: Vec<&str> = ifaces.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["org.bluez.Adapter1", "org.freedesktop.DBus.Properties"]);
    }

    #[test]
    fn test_parse_method_directions() {
        let ifaces = parse_introspection(BLUEZ).unwrap();
        let adapter = &ifaces[0];
        assert_eq!(adapter.methods.len(), 4);

        let remove = adapter.method("RemoveDevice").unwrap();
        assert_eq!(remove.in_args.len(), 1);
        assert_eq!(remove.in_args[0].ty, Type::Primitive(Primitive::ObjectPath));
        assert!(remove.out_args.is_empty());

        let filters = adapter.method("GetDiscoveryFilters").unwrap();
        assert!(filters.in_args.is_empty());
        assert_eq!(filters.out_args[0].name, "filters");

        let set = adapter.method("SetDiscoveryFilter").unwrap();
        assert_eq!(set.in_args.len(), 1);
        assert_eq!(
            set.in_args[0].ty,
            Type::Dictionary(Primitive::String, Box::new(Type::Variant))
        );
        assert!(set.is_no_reply());
    }

    #[test]
    fn test_parse_properties() {
        let ifaces = parse_introspection(BLUEZ).unwrap();
        let props = &ifaces[0].properties;
        assert_eq!(props.len(), 3);
        assert_eq!(props[0].access, Access::Read);
        assert_eq!(props[1].access, Access::ReadWrite);
        assert_eq!(props[2].arg.ty, Type::Primitive(Primitive::Boolean));
        assert!(props[2].is_deprecated());
    }

    #[test]
    fn test_parse_signal_args() {
        let ifaces = parse_introspection(BLUEZ).unwrap();
        let signal = &ifaces[1].signals[0];
        assert_eq!(signal.name, "PropertiesChanged");
        let names: Vec<&str> = signal.args.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["interface_name", "changed_properties", "invalidated_properties"]
        );
    }

    #[test]
    fn test_parse_node_children() {
        let root = read_document(BLUEZ).unwrap();
        let node = parse_node(&root).unwrap();
        assert_eq!(node.child_names(), vec!["hci0"]);
        assert_eq!(node.interfaces.len(), 2);
    }

    #[test]
    fn test_nested_inline_interfaces() {
        let xml = r#"<node name="/">
  <node name="a"><interface name="org.example.A"/></node>
  <interface name="org.example.Root"/>
</node>"#;
        let names: Vec<String> = parse_introspection(xml)
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["org.example.Root", "org.example.A"]);
    }

    #[test]
    fn test_interface_repeated_on_child_nodes() {
        let xml = r#"<node name="/org/example">
  <interface name="org.freedesktop.DBus.Properties">
    <method name="Get"><arg type="s" direction="in"/><arg type="s" direction="in"/><arg type="v" direction="out"/></method>
  </interface>
  <node name="child">
    <interface name="org.freedesktop.DBus.Properties"/>
    <interface name="org.example.Child"/>
  </node>
  <node name="other">
    <interface name="org.freedesktop.DBus.Properties"/>
  </node>
</node>"#;
        let interfaces = parse_introspection(xml).unwrap();
        let names: Vec<&str> = interfaces.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["org.freedesktop.DBus.Properties", "org.example.Child"]
        );
        assert!(interfaces[0].method("Get").is_some());
    }

    #[test]
    fn test_parse_bytes_rejects_invalid_utf8() {
        assert!(matches!(
            parse_bytes(&[0x3c, 0xff, 0xfe]),
            Err(SchemaError::Utf8(_))
        ));
    }

    #[test]
    fn test_root_must_be_node() {
        let err = parse_introspection("<interface name=\"a.b\"/>").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidStructure { .. }));
    }

    #[test]
    fn test_missing_arg_type() {
        let err = parse_introspection(
            r#"<node><interface name="a.b"><method name="M"><arg name="x"/></method></interface></node>"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::MissingAttribute { ref element, ref attribute }
                if element == "arg" && attribute == "type"
        ));
    }

    #[test]
    fn test_invalid_direction() {
        let err = parse_introspection(
            r#"<node><interface name="a.b"><method name="M"><arg type="s" direction="inout"/></method></interface></node>"#,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value 'inout' for attribute 'direction' on element 'arg'"
        );
    }

    #[test]
    fn test_invalid_access() {
        let err = parse_introspection(
            r#"<node><interface name="a.b"><property name="P" type="s" access="none"/></interface></node>"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidAttribute { ref value, .. } if value == "none"));
    }

    #[test]
    fn test_invalid_interface_name() {
        let err = parse_introspection(r#"<node><interface name="org..x"/></node>"#).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidAttribute { ref element, .. } if element == "interface"));
    }

    #[test]
    fn test_invalid_member_names() {
        for (element, xml) in [
            ("method", r#"<method name="Get-All"/>"#),
            ("property", r#"<property name="1st" type="s" access="read"/>"#),
            ("signal", r#"<signal name="c.d"/>"#),
        ] {
            let doc = format!(r#"<node><interface name="a.b">{xml}</interface></node>"#);
            let err = parse_introspection(&doc).unwrap_err();
            assert!(
                matches!(
                    err,
                    SchemaError::InvalidAttribute { element: ref e, ref attribute, .. }
                        if e == element && attribute == "name"
                ),
                "{element}: {err}"
            );
        }
    }

    #[test]
    fn test_signature_error_carries_path() {
        let err = parse_introspection(
            r#"<node><interface name="org.x"><method name="Foo"><arg name="bar" type="a{vs}"/></method></interface></node>"#,
        )
        .unwrap_err();

        let SchemaError::Signature { path, source } = err else {
            panic!("expected a signature error");
        };
        assert_eq!(path, "interface org.x / method Foo / arg bar");
        assert_eq!(source.kind, SignatureErrorKind::DictKeyNotPrimitive);
    }

    #[test]
    fn test_anonymous_signal_arg_path() {
        let err = parse_introspection(
            r#"<node><interface name="org.x"><signal name="S"><arg type="ss"/></signal></interface></node>"#,
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("interface org.x / signal S / arg #0: "));
    }

    #[test]
    fn test_property_signature_error_path() {
        let err = parse_introspection(
            r#"<node><interface name="org.x"><property name="P" type="(" access="read"/></interface></node>"#,
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("interface org.x / property P: "));
    }

    #[test]
    fn test_interface_annotations_and_unknown_elements() {
        let ifaces = parse_introspection(
            r#"<node><interface name="org.x">
  <doc><summary>ignored</summary></doc>
  <annotation name="org.freedesktop.DBus.Deprecated" value="true"/>
</interface></node>"#,
        )
        .unwrap();
        assert!(ifaces[0].is_deprecated());
        assert!(ifaces[0].methods.is_empty());
    }
}
