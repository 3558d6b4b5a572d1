//! Collation, store-type casts and AT TIME ZONE.

use std::sync::Arc;

use ferrite_sql_core::{Printer, SqlType, TypeMapping, Visitor};

use crate::error::{PgExprError, Result};
use crate::expr::{PgExpr, PgSqlExprRef};

/// Applies a collation: `operand COLLATE "name"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Collate {
    operand: PgSqlExprRef,
    collation: String,
    ty: SqlType,
}

impl Collate {
    /// Creates a collation application; the result type is the operand's.
    #[must_use]
    pub fn new(operand: PgSqlExprRef, collation: impl Into<String>) -> Self {
        let ty = operand.ty().clone();
        Self {
            operand,
            collation: collation.into(),
            ty,
        }
    }

    /// The collated operand.
    #[must_use]
    pub const fn operand(&self) -> &PgSqlExprRef {
        &self.operand
    }

    /// The collation name.
    #[must_use]
    pub fn collation(&self) -> &str {
        &self.collation
    }

    /// The semantic result type (the operand's type).
    #[must_use]
    pub const fn ty(&self) -> &SqlType {
        &self.ty
    }

    /// Update-if-changed: returns `self` (sharing the operand) when the
    /// operand is reference-identical, a rebuilt node otherwise.
    #[must_use]
    pub fn update(&self, operand: PgSqlExprRef) -> Self {
        if Arc::ptr_eq(&operand, &self.operand) {
            self.clone()
        } else {
            Self {
                operand,
                collation: self.collation.clone(),
                ty: self.ty.clone(),
            }
        }
    }

    /// Visits the operand.
    pub fn visit_children<V: Visitor<PgExpr>>(&self, visitor: &mut V) -> Option<Self> {
        let operand = visitor.visit(&self.operand);
        if Arc::ptr_eq(&operand, &self.operand) {
            None
        } else {
            Some(self.update(operand))
        }
    }

    /// Renders `operand COLLATE "name"`.
    pub fn print(&self, printer: &mut Printer<'_, PgExpr>) {
        printer.visit_operand(&self.operand);
        printer.append(" COLLATE ");
        let quoted = printer.dialect().quote_identifier(&self.collation);
        printer.append(&quoted);
    }
}

/// An explicit store-type cast, rendered Postgres-style: `operand::storetype`.
///
/// Unlike the other nodes, the store-type mapping is mandatory here: it names
/// the cast target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreCast {
    operand: PgSqlExprRef,
    ty: SqlType,
    type_mapping: TypeMapping,
}

impl StoreCast {
    /// Creates a cast to the given semantic type and store type.
    #[must_use]
    pub const fn new(operand: PgSqlExprRef, ty: SqlType, type_mapping: TypeMapping) -> Self {
        Self {
            operand,
            ty,
            type_mapping,
        }
    }

    /// The cast operand.
    #[must_use]
    pub const fn operand(&self) -> &PgSqlExprRef {
        &self.operand
    }

    /// The semantic result type.
    #[must_use]
    pub const fn ty(&self) -> &SqlType {
        &self.ty
    }

    /// The cast target's store-type mapping.
    #[must_use]
    pub const fn type_mapping(&self) -> &TypeMapping {
        &self.type_mapping
    }

    /// Update-if-changed; see [`Collate::update`].
    #[must_use]
    pub fn update(&self, operand: PgSqlExprRef) -> Self {
        if Arc::ptr_eq(&operand, &self.operand) {
            self.clone()
        } else {
            Self {
                operand,
                ty: self.ty.clone(),
                type_mapping: self.type_mapping.clone(),
            }
        }
    }

    /// Visits the operand.
    pub fn visit_children<V: Visitor<PgExpr>>(&self, visitor: &mut V) -> Option<Self> {
        let operand = visitor.visit(&self.operand);
        if Arc::ptr_eq(&operand, &self.operand) {
            None
        } else {
            Some(self.update(operand))
        }
    }

    /// Renders `operand::storetype`.
    pub fn print(&self, printer: &mut Printer<'_, PgExpr>) {
        printer.visit_operand(&self.operand);
        printer.append("::");
        printer.append(self.type_mapping.store_type());
    }
}

/// `operand AT TIME ZONE zone`.
///
/// Converts between timestamp flavors: a `timestamptz` operand yields
/// `timestamp`, and vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AtTimeZone {
    operand: PgSqlExprRef,
    time_zone: PgSqlExprRef,
    ty: SqlType,
}

impl AtTimeZone {
    /// Creates an AT TIME ZONE node.
    ///
    /// # Errors
    ///
    /// Rejects an operand that is neither `timestamp` nor `timestamptz`.
    pub fn new(operand: PgSqlExprRef, time_zone: PgSqlExprRef) -> Result<Self> {
        let ty = match operand.ty() {
            SqlType::Timestamp => SqlType::TimestampTz,
            SqlType::TimestampTz => SqlType::Timestamp,
            other => {
                return Err(PgExprError::NonTimestampOperand {
                    found: other.clone(),
                })
            }
        };
        Ok(Self {
            operand,
            time_zone,
            ty,
        })
    }

    /// The timestamp operand.
    #[must_use]
    pub const fn operand(&self) -> &PgSqlExprRef {
        &self.operand
    }

    /// The time zone expression.
    #[must_use]
    pub const fn time_zone(&self) -> &PgSqlExprRef {
        &self.time_zone
    }

    /// The semantic result type (the opposite timestamp flavor).
    #[must_use]
    pub const fn ty(&self) -> &SqlType {
        &self.ty
    }

    /// Update-if-changed; see [`Collate::update`].
    #[must_use]
    pub fn update(&self, operand: PgSqlExprRef, time_zone: PgSqlExprRef) -> Self {
        if Arc::ptr_eq(&operand, &self.operand) && Arc::ptr_eq(&time_zone, &self.time_zone) {
            self.clone()
        } else {
            Self {
                operand,
                time_zone,
                ty: self.ty.clone(),
            }
        }
    }

    /// Visits operand then time zone.
    pub fn visit_children<V: Visitor<PgExpr>>(&self, visitor: &mut V) -> Option<Self> {
        let operand = visitor.visit(&self.operand);
        let time_zone = visitor.visit(&self.time_zone);
        if Arc::ptr_eq(&operand, &self.operand) && Arc::ptr_eq(&time_zone, &self.time_zone) {
            None
        } else {
            Some(self.update(operand, time_zone))
        }
    }

    /// Renders `operand AT TIME ZONE zone`.
    pub fn print(&self, printer: &mut Printer<'_, PgExpr>) {
        printer.visit_operand(&self.operand);
        printer.append(" AT TIME ZONE ");
        printer.visit_operand(&self.time_zone);
    }
}
