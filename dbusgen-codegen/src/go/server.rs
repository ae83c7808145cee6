//! Server side generation: the contract interface, export helpers and the
//! unimplemented adapter.

use super::model::{InterfaceModel, MethodModel};
use super::{doc_comment, go_type, quote};
use dbusgen_schema::{Annotated, Arg};

/// Generator for the server code of one interface.
pub struct ServerGenerator<'a> {
    model: &'a InterfaceModel<'a>,
}

impl<'a> ServerGenerator<'a> {
    /// Creates a new server generator.
    #[must_use]
    pub fn new(model: &'a InterfaceModel<'a>) -> Self {
        Self { model }
    }

    /// Generates the server code.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();
        output.push_str(&self.generate_contract());
        output.push_str(&self.generate_export());
        output.push_str(&self.generate_unimplemented());
        output
    }

    fn generate_contract(&self) -> String {
        let model = self.model;
        let name = model.server_type();
        let mut output = doc_comment(
            &format!("{name} is the server side of the {} interface.", model.iface.name),
            model.iface.is_deprecated(),
            "",
        );
        output.push_str(&format!("type {name} interface {{\n"));
        for method in &model.methods {
            output.push_str(&doc_comment(
                &format!(
                    "{} is {}.{} method.",
                    method.go_name, model.iface.name, method.method.name
                ),
                method.method.is_deprecated(),
                "\t",
            ));
            output.push_str(&format!("\t{}\n", signature(method)));
        }
        output.push_str("}\n\n");
        output
    }

    fn generate_export(&self) -> String {
        let model = self.model;
        let mut output = String::new();

        output.push_str(&format!(
            "// {} exports the given object that implements {} on the bus.\n",
            model.export_fn(),
            model.iface.name
        ));
        output.push_str(&format!(
            "func {}(conn *dbus.Conn, path dbus.ObjectPath, v {}) error {{\n",
            model.export_fn(),
            model.server_type()
        ));
        if model.methods.is_empty() {
            output.push_str(&format!(
                "\treturn conn.ExportMethodTable(map[string]interface{{}}{{}}, path, {})\n",
                model.name_const()
            ));
        } else {
            output.push_str("\treturn conn.ExportMethodTable(map[string]interface{}{\n");
            for method in &model.methods {
                output.push_str(&format!(
                    "\t\t{}: v.{},\n",
                    quote(&method.method.name),
                    method.go_name
                ));
            }
            output.push_str(&format!("\t}}, path, {})\n", model.name_const()));
        }
        output.push_str("}\n\n");

        output.push_str(&format!(
            "// {} unexports {} interface on the named path.\n",
            model.unexport_fn(),
            model.iface.name
        ));
        output.push_str(&format!(
            "func {}(conn *dbus.Conn, path dbus.ObjectPath) error {{\n",
            model.unexport_fn()
        ));
        output.push_str(&format!(
            "\treturn conn.Export(nil, path, {})\n",
            model.name_const()
        ));
        output.push_str("}\n\n");
        output
    }

    fn generate_unimplemented(&self) -> String {
        let model = self.model;
        let name = model.unimplemented_type();
        let mut output = String::new();

        output.push_str(&format!(
            "// {name} can be embedded to have forward compatible server implementations.\n"
        ));
        output.push_str(&format!("type {name} struct{{}}\n\n"));

        for method in &model.methods {
            output.push_str(&format!("func (*{name}) {} {{\n", signature(method)));
            output.push_str("\terr = &dbus.ErrMsgUnknownMethod\n");
            output.push_str("\treturn\n");
            output.push_str("}\n\n");
        }
        output
    }
}

/// Method signature of the server contract: the in arguments, then the
/// named out arguments followed by the D-Bus error.
fn signature(method: &MethodModel<'_>) -> String {
    let params = params(&method.method.in_args, &method.in_names);
    let mut results = params_list(&method.method.out_args, &method.out_names);
    results.push("err *dbus.Error".to_string());
    format!("{}({params}) ({})", method.go_name, results.join(", "))
}

fn params(args: &[Arg], names: &[String]) -> String {
    params_list(args, names).join(", ")
}

fn params_list(args: &[Arg], names: &[String]) -> Vec<String> {
    names
        .iter()
        .zip(args)
        .map(|(name, arg)| format!("{name} {}", go_type(&arg.ty)))
        .collect()
}
