//! Function calls with mixed positional and named arguments.

use std::sync::Arc;

use ferrite_sql_core::{Printer, SqlType, TypeMapping, Visitor};

use crate::error::{PgExprError, Result};
use crate::expr::{PgExpr, PgSqlExprRef};

/// A function call supporting named arguments (`name => value`) and custom
/// argument separators (e.g. `substring(x FROM 2 FOR 3)`).
///
/// Argument names are positionally aligned with the arguments; `None` means
/// positional. All positional entries must precede the named ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PgFunction {
    name: String,
    args: Vec<PgSqlExprRef>,
    arg_names: Vec<Option<String>>,
    separators: Option<Vec<String>>,
    ty: SqlType,
    type_mapping: Option<TypeMapping>,
}

impl PgFunction {
    /// Creates a call with positional arguments only.
    #[must_use]
    pub fn positional(name: impl Into<String>, args: Vec<PgSqlExprRef>, ty: SqlType) -> Self {
        let arg_names = vec![None; args.len()];
        Self {
            name: name.into(),
            args,
            arg_names,
            separators: None,
            ty,
            type_mapping: None,
        }
    }

    /// Creates a call with a name entry per argument.
    ///
    /// # Errors
    ///
    /// Rejects a name list whose length disagrees with the argument list and
    /// a positional (`None`) entry appearing after a named one.
    pub fn named(
        name: impl Into<String>,
        args: Vec<PgSqlExprRef>,
        arg_names: Vec<Option<String>>,
        ty: SqlType,
    ) -> Result<Self> {
        if arg_names.len() != args.len() {
            return Err(PgExprError::ArgumentNameCountMismatch {
                names: arg_names.len(),
                arguments: args.len(),
            });
        }
        let mut seen_named = false;
        for (index, entry) in arg_names.iter().enumerate() {
            match entry {
                Some(_) => seen_named = true,
                None if seen_named => {
                    return Err(PgExprError::PositionalAfterNamed { index });
                }
                None => {}
            }
        }
        Ok(Self {
            name: name.into(),
            args,
            arg_names,
            separators: None,
            ty,
            type_mapping: None,
        })
    }

    /// Sets custom separators; `separators[i]` is printed between argument
    /// `i` and argument `i + 1` in place of `", "`.
    ///
    /// # Errors
    ///
    /// Rejects a separator list whose length is not `args.len() - 1`.
    pub fn with_separators(mut self, separators: Vec<String>) -> Result<Self> {
        if separators.len() + 1 != self.args.len() {
            return Err(PgExprError::SeparatorCountMismatch {
                separators: separators.len(),
                arguments: self.args.len(),
            });
        }
        self.separators = Some(separators);
        Ok(self)
    }

    /// Attaches a store-type mapping.
    #[must_use]
    pub fn with_mapping(mut self, mapping: TypeMapping) -> Self {
        self.type_mapping = Some(mapping);
        self
    }

    /// The function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The arguments, in call order.
    #[must_use]
    pub fn args(&self) -> &[PgSqlExprRef] {
        &self.args
    }

    /// The argument names, positionally aligned with [`PgFunction::args`].
    #[must_use]
    pub fn arg_names(&self) -> &[Option<String>] {
        &self.arg_names
    }

    /// The custom separators, if any.
    #[must_use]
    pub fn separators(&self) -> Option<&[String]> {
        self.separators.as_deref()
    }

    /// The semantic result type.
    #[must_use]
    pub const fn ty(&self) -> &SqlType {
        &self.ty
    }

    /// The store-type mapping, if any.
    #[must_use]
    pub fn type_mapping(&self) -> Option<&TypeMapping> {
        self.type_mapping.as_ref()
    }

    /// Update-if-changed over the argument list, preserving names,
    /// separators, type and mapping.
    ///
    /// # Panics
    ///
    /// Panics if `args` has a different length than the current list.
    #[must_use]
    pub fn update(&self, args: Vec<PgSqlExprRef>) -> Self {
        assert_eq!(
            args.len(),
            self.args.len(),
            "rewritten argument list changed arity"
        );
        if args
            .iter()
            .zip(&self.args)
            .all(|(new, old)| Arc::ptr_eq(new, old))
        {
            self.clone()
        } else {
            Self {
                name: self.name.clone(),
                args,
                arg_names: self.arg_names.clone(),
                separators: self.separators.clone(),
                ty: self.ty.clone(),
                type_mapping: self.type_mapping.clone(),
            }
        }
    }

    /// Visits the arguments in call order.
    pub fn visit_children<V: Visitor<PgExpr>>(&self, visitor: &mut V) -> Option<Self> {
        ferrite_sql_core::visit_expr_list(visitor, &self.args).map(|args| self.update(args))
    }

    /// Renders `name(a, b => x, c => y)`, honoring custom separators.
    pub fn print(&self, printer: &mut Printer<'_, PgExpr>) {
        printer.append(&self.name);
        printer.append("(");
        for (index, arg) in self.args.iter().enumerate() {
            if index > 0 {
                match self.separators.as_ref().and_then(|s| s.get(index - 1)) {
                    Some(separator) => printer.append(separator),
                    None => printer.append(", "),
                }
            }
            if let Some(name) = &self.arg_names[index] {
                printer.append(name);
                printer.append(" => ");
            }
            printer.visit(arg);
        }
        printer.append(")");
    }
}
