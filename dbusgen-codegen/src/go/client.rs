//! Client proxy generation.

use super::model::{InterfaceModel, MethodModel, PropertyModel};
use super::signals::signal_types;
use super::{doc_comment, go_type, quote};
use dbusgen_schema::Annotated;

const PROPERTIES_GET: &str = "\"org.freedesktop.DBus.Properties.Get\"";
const PROPERTIES_SET: &str = "\"org.freedesktop.DBus.Properties.Set\"";

/// Generator for the client code of one interface.
pub struct ClientGenerator<'a> {
    model: &'a InterfaceModel<'a>,
}

impl<'a> ClientGenerator<'a> {
    /// Creates a new client generator.
    #[must_use]
    pub fn new(model: &'a InterfaceModel<'a>) -> Self {
        Self { model }
    }

    /// Generates the proxy struct, its calls and accessors, and the
    /// signal types of the interface.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();
        output.push_str(&self.generate_struct());

        for method in &self.model.methods {
            output.push_str(&self.generate_method(method));
        }
        for property in &self.model.properties {
            output.push_str(&self.generate_accessors(property));
        }

        output.push_str(&signal_types(self.model));
        output
    }

    fn generate_struct(&self) -> String {
        let model = self.model;
        let name = &model.type_name;
        let mut output = String::new();

        output.push_str(&format!(
            "// {} creates and allocates {}.\n",
            model.constructor(),
            model.iface.name
        ));
        output.push_str(&format!(
            "func {}(object dbus.BusObject) *{name} {{\n",
            model.constructor()
        ));
        output.push_str(&format!("\treturn &{name}{{object}}\n"));
        output.push_str("}\n\n");

        output.push_str(&doc_comment(
            &format!("{name} implements {} D-Bus interface.", model.iface.name),
            model.iface.is_deprecated(),
            "",
        ));
        output.push_str(&format!("type {name} struct {{\n"));
        output.push_str("\tobject dbus.BusObject\n");
        output.push_str("}\n\n");
        output
    }

    fn generate_method(&self, method: &MethodModel<'_>) -> String {
        let model = self.model;
        let wire = &method.method;
        let mut output = doc_comment(
            &format!("{} calls {}.{} method.", method.go_name, model.iface.name, wire.name),
            wire.is_deprecated(),
            "",
        );

        let mut params = vec!["ctx context.Context".to_string()];
        params.extend(
            method
                .in_names
                .iter()
                .zip(&wire.in_args)
                .map(|(name, arg)| format!("{name} {}", go_type(&arg.ty))),
        );
        let mut results: Vec<String> = method
            .out_names
            .iter()
            .zip(&wire.out_args)
            .map(|(name, arg)| format!("{name} {}", go_type(&arg.ty)))
            .collect();
        results.push("err error".to_string());

        output.push_str(&format!(
            "func (o *{}) {}({}) ({}) {{\n",
            model.type_name,
            method.go_name,
            params.join(", "),
            results.join(", ")
        ));

        let flags = if wire.is_no_reply() {
            "dbus.FlagNoReplyExpected"
        } else {
            "0"
        };
        let mut call_args = vec![
            "ctx".to_string(),
            format!("{}+{}", model.name_const(), quote(&format!(".{}", wire.name))),
            flags.to_string(),
        ];
        call_args.extend(method.in_names.iter().cloned());
        let targets: Vec<String> = method.out_names.iter().map(|n| format!("&{n}")).collect();

        output.push_str(&format!(
            "\terr = o.object.CallWithContext({}).Store({})\n",
            call_args.join(", "),
            targets.join(", ")
        ));
        output.push_str("\treturn\n");
        output.push_str("}\n\n");
        output
    }

    fn generate_accessors(&self, property: &PropertyModel<'_>) -> String {
        let model = self.model;
        let wire = property.property;
        let ty = go_type(&wire.arg.ty);
        let value = &property.value_name;
        let deprecated = wire.is_deprecated();
        let mut output = String::new();

        if let Some(getter) = &property.getter {
            output.push_str(&doc_comment(
                &format!("{getter} gets {}.{} property.", model.iface.name, wire.name),
                deprecated,
                "",
            ));
            output.push_str(&format!(
                "func (o *{}) {getter}(ctx context.Context) ({value} {ty}, err error) {{\n",
                model.type_name
            ));
            output.push_str(&format!(
                "\terr = o.object.CallWithContext(ctx, {PROPERTIES_GET}, 0, {}, {}).Store(&{value})\n",
                model.name_const(),
                quote(&wire.name)
            ));
            output.push_str("\treturn\n");
            output.push_str("}\n\n");
        }

        if let Some(setter) = &property.setter {
            output.push_str(&doc_comment(
                &format!("{setter} sets {}.{} property.", model.iface.name, wire.name),
                deprecated,
                "",
            ));
            output.push_str(&format!(
                "func (o *{}) {setter}(ctx context.Context, {value} {ty}) error {{\n",
                model.type_name
            ));
            output.push_str(&format!(
                "\treturn o.object.CallWithContext(ctx, {PROPERTIES_SET}, 0, {}, {}, dbus.MakeVariant({value})).Store()\n",
                model.name_const(),
                quote(&wire.name)
            ));
            output.push_str("}\n\n");
        }
        output
    }
}
