//! Signal types and the shared signal helpers.

use super::model::{InterfaceModel, Model, SignalModel};
use super::{aligned, doc_comment, go_type, quote};
use dbusgen_schema::Annotated;

/// Generator for the `Signal` interface and the functions working on it.
pub struct SignalHelperGenerator<'a> {
    model: &'a Model<'a>,
}

impl<'a> SignalHelperGenerator<'a> {
    /// Creates a new signal helper generator.
    #[must_use]
    pub fn new(model: &'a Model<'a>) -> Self {
        Self { model }
    }

    /// Generates the helpers. Returns an empty string if no interface
    /// declares a signal.
    #[must_use]
    pub fn generate(&self) -> String {
        if !self.model.has_signals() {
            return String::new();
        }

        let mut output = String::new();
        output.push_str(SIGNAL_INTERFACE);
        output.push_str(&self.generate_lookup());
        output.push_str(MATCH_HELPERS);
        output
    }

    fn generate_lookup(&self) -> String {
        let mut output = String::new();
        output.push_str("// ErrUnknownSignal is returned by LookupSignal when a signal cannot be resolved.\n");
        output.push_str("var ErrUnknownSignal = errors.New(\"unknown signal\")\n\n");
        output.push_str("// LookupSignal converts the given raw D-Bus signal into one with a typed\n");
        output.push_str("// body or returns ErrUnknownSignal.\n");
        output.push_str("func LookupSignal(signal *dbus.Signal) (Signal, error) {\n");
        output.push_str("\tswitch signal.Name {\n");

        for iface in &self.model.interfaces {
            for signal in &iface.signals {
                output.push_str(&lookup_case(iface, signal));
            }
        }

        output.push_str("\tdefault:\n");
        output.push_str("\t\treturn nil, ErrUnknownSignal\n");
        output.push_str("\t}\n");
        output.push_str("}\n\n");
        output
    }
}

const SIGNAL_INTERFACE: &str = "\
// Signal is a common interface for all signals.
type Signal interface {
\tName() string
\tInterface() string
\tSender() string

\tpath() dbus.ObjectPath
\tvalues() []interface{}
}

// Emit sends the given signal to the bus.
func Emit(conn *dbus.Conn, s Signal) error {
\treturn conn.Emit(s.path(), s.Interface()+\".\"+s.Name(), s.values()...)
}

";

const MATCH_HELPERS: &str = "\
// AddMatchSignal registers a match rule for the given signal,
// opts are appended to the automatically generated signal's rules.
func AddMatchSignal(conn *dbus.Conn, s Signal, opts ...dbus.MatchOption) error {
\treturn conn.AddMatchSignal(append([]dbus.MatchOption{
\t\tdbus.WithMatchInterface(s.Interface()),
\t\tdbus.WithMatchMember(s.Name()),
\t}, opts...)...)
}

// RemoveMatchSignal unregisters the previously registered subscription.
func RemoveMatchSignal(conn *dbus.Conn, s Signal, opts ...dbus.MatchOption) error {
\treturn conn.RemoveMatchSignal(append([]dbus.MatchOption{
\t\tdbus.WithMatchInterface(s.Interface()),
\t\tdbus.WithMatchMember(s.Name()),
\t}, opts...)...)
}

";

fn lookup_case(iface: &InterfaceModel<'_>, signal: &SignalModel<'_>) -> String {
    let mut output = format!(
        "\tcase {} + \".\" + {}:\n",
        iface.name_const(),
        quote(&signal.signal.name)
    );

    let args = &signal.signal.args;
    if !args.is_empty() {
        let mut targets = Vec::with_capacity(args.len());
        for (i, arg) in args.iter().enumerate() {
            output.push_str(&format!("\t\tvar v{i} {}\n", go_type(&arg.ty)));
            targets.push(format!("&v{i}"));
        }
        output.push_str(&format!(
            "\t\tif err := dbus.Store(signal.Body, {}); err != nil {{\n",
            targets.join(", ")
        ));
        output.push_str("\t\t\treturn nil, fmt.Errorf(\"%s: %w\", signal.Name, err)\n");
        output.push_str("\t\t}\n");
    }

    let fields: Vec<String> = signal
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| format!("{field}: v{i}"))
        .collect();
    output.push_str(&format!("\t\treturn &{}{{\n", signal.type_name));
    output.push_str("\t\t\tsender: signal.Sender,\n");
    output.push_str("\t\t\tPath:   signal.Path,\n");
    output.push_str(&format!(
        "\t\t\tBody:   &{}{{{}}},\n",
        signal.body_type,
        fields.join(", ")
    ));
    output.push_str("\t\t}, nil\n");
    output
}

/// Generates the signal and body types of one interface.
#[must_use]
pub fn signal_types(iface: &InterfaceModel<'_>) -> String {
    let mut output = String::new();
    for signal in &iface.signals {
        output.push_str(&signal_type(iface, signal));
    }
    output
}

fn signal_type(iface: &InterfaceModel<'_>, signal: &SignalModel<'_>) -> String {
    let name = &signal.type_name;
    let wire = &signal.signal.name;
    let mut output = doc_comment(
        &format!("{name} represents {}.{wire} signal.", iface.iface.name),
        signal.signal.is_deprecated(),
        "",
    );

    output.push_str(&format!("type {name} struct {{\n"));
    output.push_str(&aligned(
        &[
            ("sender".to_string(), "string".to_string()),
            ("Path".to_string(), "dbus.ObjectPath".to_string()),
            ("Body".to_string(), format!("*{}", signal.body_type)),
        ],
        "\t",
    ));
    output.push_str("}\n\n");

    output.push_str("// Name returns the signal's name.\n");
    output.push_str(&format!("func (s *{name}) Name() string {{\n"));
    output.push_str(&format!("\treturn {}\n", quote(wire)));
    output.push_str("}\n\n");

    output.push_str("// Interface returns the signal's interface.\n");
    output.push_str(&format!("func (s *{name}) Interface() string {{\n"));
    output.push_str(&format!("\treturn {}\n", iface.name_const()));
    output.push_str("}\n\n");

    output.push_str("// Sender returns the signal's sender unique name.\n");
    output.push_str(&format!("func (s *{name}) Sender() string {{\n"));
    output.push_str("\treturn s.sender\n");
    output.push_str("}\n\n");

    output.push_str(&format!("func (s *{name}) path() dbus.ObjectPath {{\n"));
    output.push_str("\treturn s.Path\n");
    output.push_str("}\n\n");

    let values: Vec<String> = signal
        .fields
        .iter()
        .map(|field| format!("s.Body.{field}"))
        .collect();
    output.push_str(&format!("func (s *{name}) values() []interface{{}} {{\n"));
    output.push_str(&format!("\treturn []interface{{}}{{{}}}\n", values.join(", ")));
    output.push_str("}\n\n");

    output.push_str(&format!("// {} is the body container of {name}.\n", signal.body_type));
    if signal.fields.is_empty() {
        output.push_str(&format!("type {} struct{{}}\n\n", signal.body_type));
    } else {
        let rows: Vec<(String, String)> = signal
            .fields
            .iter()
            .zip(&signal.signal.args)
            .map(|(field, arg)| (field.clone(), go_type(&arg.ty)))
            .collect();
        output.push_str(&format!("type {} struct {{\n", signal.body_type));
        output.push_str(&aligned(&rows, "\t"));
        output.push_str("}\n\n");
    }
    output
}
