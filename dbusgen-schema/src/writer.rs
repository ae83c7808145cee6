//! Introspection document writer.
//!
//! Serializes interfaces back into a single tab-indented introspection
//! document, used to combine several sources into one file.

use crate::types::{Annotation, Arg, Interface, Method, Property, Signal};
use quick_xml::escape::escape;

const DOCTYPE: &str = "<!DOCTYPE node PUBLIC \
\"-//freedesktop//DTD D-BUS Object Introspection 1.0//EN\"\n \
\"http://www.freedesktop.org/standards/dbus/1.0/introspect.dtd\">\n";

/// Writes interfaces as one introspection document with a root `node`.
#[must_use]
pub fn write_introspection(interfaces: &[Interface]) -> String {
    let mut w = XmlWriter::default();
    w.out.push_str(DOCTYPE);

    w.element("node", &[], |w| {
        for iface in interfaces {
            write_interface(w, iface);
        }
    });
    w.out
}

fn write_interface(w: &mut XmlWriter, iface: &Interface) {
    let empty = iface.methods.is_empty()
        && iface.properties.is_empty()
        && iface.signals.is_empty()
        && iface.annotations.is_empty();
    if empty {
        w.empty("interface", &[("name", iface.name.as_str())]);
        return;
    }

    w.element("interface", &[("name", iface.name.as_str())], |w| {
        for method in &iface.methods {
            write_method(w, method);
        }
        for signal in &iface.signals {
            write_signal(w, signal);
        }
        for property in &iface.properties {
            write_property(w, property);
        }
        write_annotations(w, &iface.annotations);
    });
}

fn write_method(w: &mut XmlWriter, method: &Method) {
    if method.in_args.is_empty() && method.out_args.is_empty() && method.annotations.is_empty() {
        w.empty("method", &[("name", method.name.as_str())]);
        return;
    }

    w.element("method", &[("name", method.name.as_str())], |w| {
        for arg in &method.in_args {
            write_arg(w, arg, Some("in"));
        }
        for arg in &method.out_args {
            write_arg(w, arg, Some("out"));
        }
        write_annotations(w, &method.annotations);
    });
}

fn write_signal(w: &mut XmlWriter, signal: &Signal) {
    if signal.args.is_empty() && signal.annotations.is_empty() {
        w.empty("signal", &[("name", signal.name.as_str())]);
        return;
    }

    w.element("signal", &[("name", signal.name.as_str())], |w| {
        for arg in &signal.args {
            write_arg(w, arg, None);
        }
        write_annotations(w, &signal.annotations);
    });
}

fn write_property(w: &mut XmlWriter, property: &Property) {
    let signature = property.arg.ty.signature();
    let attrs = [
        ("name", property.name.as_str()),
        ("type", signature.as_str()),
        ("access", property.access.as_str()),
    ];

    if property.annotations.is_empty() {
        w.empty("property", &attrs);
    } else {
        w.element("property", &attrs, |w| {
            write_annotations(w, &property.annotations);
        });
    }
}

fn write_arg(w: &mut XmlWriter, arg: &Arg, direction: Option<&str>) {
    let signature = arg.ty.signature();
    let mut attrs = Vec::with_capacity(3);
    if !arg.name.is_empty() {
        attrs.push(("name", arg.name.as_str()));
    }
    attrs.push(("type", signature.as_str()));
    if let Some(direction) = direction {
        attrs.push(("direction", direction));
    }
    w.empty("arg", &attrs);
}

fn write_annotations(w: &mut XmlWriter, annotations: &[Annotation]) {
    for a in annotations {
        w.empty("annotation", &[("name", a.name.as_str()), ("value", a.value.as_str())]);
    }
}

#[derive(Default)]
struct XmlWriter {
    out: String,
    depth: usize,
}

impl XmlWriter {
    fn start_tag(&mut self, name: &str, attrs: &[(&str, &str)]) {
        for _ in 0..self.depth {
            self.out.push('\t');
        }
        self.out.push('<');
        self.out.push_str(name);
        for (key, value) in attrs {
            self.out.push(' ');
            self.out.push_str(key);
            self.out.push_str("=\"");
            self.out.push_str(&escape(*value));
            self.out.push('"');
        }
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) {
        self.start_tag(name, attrs);
        self.out.push_str("/>\n");
    }

    fn element(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
        body: impl FnOnce(&mut Self),
    ) {
        self.start_tag(name, attrs);
        self.out.push_str(">\n");
        self.depth += 1;
        body(self);
        self.depth -= 1;
        for _ in 0..self.depth {
            self.out.push('\t');
        }
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push_str(">\n");
    }
}
