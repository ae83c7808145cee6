//! Embedded introspection data generation.

use super::model::{InterfaceModel, Model};
use super::quote;
use dbusgen_schema::{Annotation, Arg};

/// Generator for `introspect.Interface` variables.
pub struct IntrospectGenerator<'a> {
    model: &'a Model<'a>,
}

impl<'a> IntrospectGenerator<'a> {
    /// Creates a new introspection data generator.
    #[must_use]
    pub fn new(model: &'a Model<'a>) -> Self {
        Self { model }
    }

    /// Generates one variable per interface.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();
        for iface in &self.model.interfaces {
            output.push_str(&self.generate_interface(iface));
        }
        output
    }

    fn generate_interface(&self, model: &InterfaceModel<'_>) -> String {
        let iface = model.iface;
        let mut output = String::new();

        output.push_str(&format!(
            "// {} is the introspection data of the {} interface.\n",
            model.introspect_var(),
            iface.name
        ));
        output.push_str(&format!(
            "var {} = introspect.Interface{{\n",
            model.introspect_var()
        ));
        output.push_str(&format!("\tName: {},\n", quote(&iface.name)));

        if !iface.methods.is_empty() {
            output.push_str("\tMethods: []introspect.Method{\n");
            for method in &iface.methods {
                output.push_str("\t\t{\n");
                output.push_str(&format!("\t\t\tName: {},\n", quote(&method.name)));
                if !method.in_args.is_empty() || !method.out_args.is_empty() {
                    output.push_str("\t\t\tArgs: []introspect.Arg{\n");
                    for arg in &method.in_args {
                        output.push_str(&arg_line(arg, Some("in")));
                    }
                    for arg in &method.out_args {
                        output.push_str(&arg_line(arg, Some("out")));
                    }
                    output.push_str("\t\t\t},\n");
                }
                output.push_str(&annotations(&method.annotations, "\t\t\t"));
                output.push_str("\t\t},\n");
            }
            output.push_str("\t},\n");
        }

        if !iface.signals.is_empty() {
            output.push_str("\tSignals: []introspect.Signal{\n");
            for signal in &iface.signals {
                output.push_str("\t\t{\n");
                output.push_str(&format!("\t\t\tName: {},\n", quote(&signal.name)));
                if !signal.args.is_empty() {
                    output.push_str("\t\t\tArgs: []introspect.Arg{\n");
                    for arg in &signal.args {
                        output.push_str(&arg_line(arg, None));
                    }
                    output.push_str("\t\t\t},\n");
                }
                output.push_str(&annotations(&signal.annotations, "\t\t\t"));
                output.push_str("\t\t},\n");
            }
            output.push_str("\t},\n");
        }

        if !iface.properties.is_empty() {
            output.push_str("\tProperties: []introspect.Property{\n");
            for prop in &iface.properties {
                output.push_str("\t\t{\n");
                output.push_str(&format!("\t\t\tName: {},\n", quote(&prop.name)));
                output.push_str(&format!(
                    "\t\t\tType: {},\n",
                    quote(&prop.arg.ty.signature())
                ));
                output.push_str(&format!("\t\t\tAccess: {},\n", quote(prop.access.as_str())));
                output.push_str(&annotations(&prop.annotations, "\t\t\t"));
                output.push_str("\t\t},\n");
            }
            output.push_str("\t},\n");
        }

        output.push_str(&annotations(&iface.annotations, "\t"));
        output.push_str("}\n\n");
        output
    }
}

fn arg_line(arg: &Arg, direction: Option<&str>) -> String {
    let mut line = format!(
        "\t\t\t\t{{Name: {}, Type: {}",
        quote(&arg.name),
        quote(&arg.ty.signature())
    );
    if let Some(direction) = direction {
        line.push_str(&format!(", Direction: {}", quote(direction)));
    }
    line.push_str("},\n");
    line
}

fn annotations(annotations: &[Annotation], indent: &str) -> String {
    if annotations.is_empty() {
        return String::new();
    }
    let mut output = format!("{indent}Annotations: []introspect.Annotation{{\n");
    for a in annotations {
        output.push_str(&format!(
            "{indent}\t{{Name: {}, Value: {}}},\n",
            quote(&a.name),
            quote(&a.value)
        ));
    }
    output.push_str(&format!("{indent}}},\n"));
    output
}
