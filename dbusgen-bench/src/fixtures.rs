//! Synthetic introspection documents and signatures.

use std::fmt::Write;

/// Signatures of increasing nesting depth.
pub const SIGNATURES: [(&str, &str); 4] = [
    ("primitive", "u"),
    ("dictionary", "a{sv}"),
    ("object_manager", "a{oa{sa{sv}}}"),
    ("structure", "a(s(iu)a{sv}(ybnqx(td)))"),
];

const MEMBER_TYPES: [&str; 6] = ["s", "u", "as", "a{sv}", "(ii)", "a{oa{sa{sv}}}"];

/// Builds an introspection document with `interfaces` interfaces, each
/// declaring `members` methods, properties and signals.
#[must_use]
pub fn synthetic_schema(interfaces: usize, members: usize) -> String {
    let mut xml = String::from("<node>\n");
    for i in 0..interfaces {
        let _ = writeln!(xml, "  <interface name=\"org.example.Service{i}\">");
        for m in 0..members {
            let ty = MEMBER_TYPES[m % MEMBER_TYPES.len()];
            let _ = writeln!(
                xml,
                "    <method name=\"Call{m}\">\
                 <arg name=\"input\" type=\"{ty}\" direction=\"in\"/>\
                 <arg name=\"output\" type=\"{ty}\" direction=\"out\"/></method>"
            );
            let _ = writeln!(
                xml,
                "    <property name=\"Value{m}\" type=\"{ty}\" access=\"readwrite\"/>"
            );
            let _ = writeln!(
                xml,
                "    <signal name=\"Changed{m}\"><arg name=\"value\" type=\"{ty}\"/></signal>"
            );
        }
        xml.push_str("  </interface>\n");
    }
    xml.push_str("</node>\n");
    xml
}
