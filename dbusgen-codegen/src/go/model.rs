//! Resolved Go names for a set of interfaces.
//!
//! Every identifier the emitters print is computed here once, so that
//! collisions are reported before any text is produced.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::naming::{GoKeywords, GoLocals, NameStyle, Namer};
use dbusgen_schema::{Arg, Interface, Method, Property, Signal};
use std::collections::BTreeMap;
use tracing::debug;

/// Top-level names of the shared signal helpers.
const SIGNAL_HELPERS: [&str; 6] = [
    "Signal",
    "Emit",
    "ErrUnknownSignal",
    "LookupSignal",
    "AddMatchSignal",
    "RemoveMatchSignal",
];

/// A method with its Go name and parameter names.
#[derive(Debug, Clone)]
pub struct MethodModel<'a> {
    /// Source method.
    pub method: &'a Method,
    /// Exported Go method name.
    pub go_name: String,
    /// Input parameter names.
    pub in_names: Vec<String>,
    /// Output parameter names.
    pub out_names: Vec<String>,
}

/// A property with its accessor names.
#[derive(Debug, Clone)]
pub struct PropertyModel<'a> {
    /// Source property.
    pub property: &'a Property,
    /// Getter name, absent when not readable or shadowed by a method.
    pub getter: Option<String>,
    /// Setter name, absent when not writable or shadowed by a method.
    pub setter: Option<String>,
    /// Parameter name of the value.
    pub value_name: String,
}

/// A signal with its generated type names.
#[derive(Debug, Clone)]
pub struct SignalModel<'a> {
    /// Source signal.
    pub signal: &'a Signal,
    /// Signal struct type.
    pub type_name: String,
    /// Body struct type.
    pub body_type: String,
    /// Exported body field names.
    pub fields: Vec<String>,
}

/// An interface with all of its generated names.
#[derive(Debug, Clone)]
pub struct InterfaceModel<'a> {
    /// Source interface.
    pub iface: &'a Interface,
    /// Client struct type name.
    pub type_name: String,
    /// Methods in document order.
    pub methods: Vec<MethodModel<'a>>,
    /// Properties in document order.
    pub properties: Vec<PropertyModel<'a>>,
    /// Signals in document order.
    pub signals: Vec<SignalModel<'a>>,
}

impl InterfaceModel<'_> {
    /// Interface name constant.
    #[must_use]
    pub fn name_const(&self) -> String {
        format!("Interface{}", self.type_name)
    }

    /// Server contract interface type.
    #[must_use]
    pub fn server_type(&self) -> String {
        format!("{}er", self.type_name)
    }

    /// Embeddable adapter answering every call with "unknown method".
    #[must_use]
    pub fn unimplemented_type(&self) -> String {
        format!("Unimplemented{}", self.type_name)
    }

    /// Introspection data variable.
    #[must_use]
    pub fn introspect_var(&self) -> String {
        format!("IntrospectData{}", self.type_name)
    }

    /// Export helper function.
    #[must_use]
    pub fn export_fn(&self) -> String {
        format!("Export{}", self.type_name)
    }

    /// Unexport helper function.
    #[must_use]
    pub fn unexport_fn(&self) -> String {
        format!("Unexport{}", self.type_name)
    }

    /// Client constructor function.
    #[must_use]
    pub fn constructor(&self) -> String {
        format!("New{}", self.type_name)
    }

    fn top_level_names(&self) -> Vec<String> {
        let mut names = vec![
            self.type_name.clone(),
            self.name_const(),
            self.server_type(),
            self.unimplemented_type(),
            self.introspect_var(),
            self.export_fn(),
            self.unexport_fn(),
            self.constructor(),
        ];
        for signal in &self.signals {
            names.push(signal.type_name.clone());
            names.push(signal.body_type.clone());
        }
        names
    }
}

/// All interfaces of one generated file.
#[derive(Debug, Clone)]
pub struct Model<'a> {
    /// Interfaces in input order.
    pub interfaces: Vec<InterfaceModel<'a>>,
}

impl<'a> Model<'a> {
    /// Resolves the names of every interface.
    ///
    /// # Errors
    /// Returns `CodegenError::AmbiguousName` if two wire names produce the
    /// same Go identifier.
    pub fn resolve(
        interfaces: &[&'a Interface],
        config: &GeneratorConfig,
    ) -> Result<Self, CodegenError> {
        let resolver = Resolver {
            types: Namer::new(config.style, GoKeywords),
            members: Namer::new(NameStyle::Camel, GoKeywords),
            params: Namer::new(NameStyle::Camel, GoLocals),
            prefixes: &config.prefixes,
        };

        let mut registry = Registry::default();
        if config.mode.client() {
            for helper in SIGNAL_HELPERS {
                registry.claim(helper, "signal helpers")?;
            }
        }

        let mut models = Vec::with_capacity(interfaces.len());
        for &iface in interfaces {
            let model = resolver.interface(iface)?;
            for name in model.top_level_names() {
                registry.claim(&name, &iface.name)?;
            }
            debug!(interface = %iface.name, type_name = %model.type_name, "resolved names");
            models.push(model);
        }

        Ok(Self { interfaces: models })
    }

    /// Returns true if any interface declares a signal.
    #[must_use]
    pub fn has_signals(&self) -> bool {
        self.interfaces.iter().any(|i| i.iface.has_signals())
    }

    /// Returns true if any signal has a body.
    #[must_use]
    pub fn has_signal_args(&self) -> bool {
        self.interfaces
            .iter()
            .flat_map(|i| &i.signals)
            .any(|s| !s.signal.args.is_empty())
    }

    /// Returns true if client code would issue any call.
    #[must_use]
    pub fn has_calls(&self) -> bool {
        self.interfaces.iter().any(|i| {
            !i.methods.is_empty()
                || i
                    .properties
                    .iter()
                    .any(|p| p.getter.is_some() || p.setter.is_some())
        })
    }
}

struct Resolver<'c> {
    types: Namer<GoKeywords>,
    members: Namer<GoKeywords>,
    params: Namer<GoLocals>,
    prefixes: &'c [String],
}

impl Resolver<'_> {
    fn interface<'a>(&self, iface: &'a Interface) -> Result<InterfaceModel<'a>, CodegenError> {
        let type_name = self.types.iface_type(&iface.name, self.prefixes);
        let owner = |member: &str| format!("{}.{member}", iface.name);

        // Methods and property accessors share the client struct.
        let mut struct_members = Registry::default();

        let mut methods = Vec::with_capacity(iface.methods.len());
        for (i, method) in iface.methods.iter().enumerate() {
            let go_name = self.members.ident(&method.name, i, "Method", true);
            struct_members.claim(&go_name, &owner(&method.name))?;

            let mut taken = Vec::new();
            let in_names = self.params(&method.in_args, "in", false, &mut taken);
            let out_names = self.params(&method.out_args, "out", false, &mut taken);
            methods.push(MethodModel {
                method,
                go_name,
                in_names,
                out_names,
            });
        }

        let mut properties = Vec::with_capacity(iface.properties.len());
        for (i, property) in iface.properties.iter().enumerate() {
            let base = self.members.ident(&property.name, i, "Property", true);
            let mut accessor =
                |enabled: bool, prefix: &str| -> Result<Option<String>, CodegenError> {
                    if !enabled {
                        return Ok(None);
                    }
                    let name = format!("{prefix}{base}");
                    if methods.iter().any(|m| m.go_name == name) {
                        debug!(
                            interface = %iface.name,
                            accessor = %name,
                            "accessor shadowed by method"
                        );
                        return Ok(None);
                    }
                    struct_members.claim(&name, &owner(&property.name))?;
                    Ok(Some(name))
                };
            let getter = accessor(property.access.can_read(), "Get")?;
            let setter = accessor(property.access.can_write(), "Set")?;

            properties.push(PropertyModel {
                property,
                getter,
                setter,
                value_name: self.params.ident(&property.name, 0, "v", false),
            });
        }

        let join = match self.types.style() {
            NameStyle::Camel => "",
            NameStyle::Underscore => "_",
        };
        let mut signals = Vec::with_capacity(iface.signals.len());
        for (i, signal) in iface.signals.iter().enumerate() {
            let member = self.members.ident(&signal.name, i, "Signal", true);
            let type_name = format!("{type_name}{join}{member}Signal");
            let mut taken = Vec::new();
            signals.push(SignalModel {
                signal,
                body_type: format!("{type_name}Body"),
                type_name,
                fields: self.params(&signal.args, "v", true, &mut taken),
            });
        }

        Ok(InterfaceModel {
            iface,
            type_name,
            methods,
            properties,
            signals,
        })
    }

    /// Names a parameter list. Duplicates fall back to the positional name.
    fn params(
        &self,
        args: &[Arg],
        prefix: &str,
        export: bool,
        taken: &mut Vec<String>,
    ) -> Vec<String> {
        args.iter()
            .enumerate()
            .map(|(i, arg)| {
                let mut name = self.params.ident(&arg.name, i, prefix, export);
                if taken.contains(&name) {
                    name = self.params.ident("", i, prefix, export);
                }
                while taken.contains(&name) {
                    name.push('_');
                }
                taken.push(name.clone());
                name
            })
            .collect()
    }
}

/// Tracks which wire name claimed each generated identifier.
#[derive(Default)]
struct Registry {
    owners: BTreeMap<String, String>,
}

impl Registry {
    fn claim(&mut self, name: &str, owner: &str) -> Result<(), CodegenError> {
        if let Some(first) = self.owners.get(name) {
            return Err(CodegenError::ambiguous(name, first.clone(), owner));
        }
        self.owners.insert(name.to_string(), owner.to_string());
        Ok(())
    }
}
