//! Repository API surface classification
//!
//! The fixed vocabulary of method names recognized as ORM data-access calls,
//! partitioned into read / write / other / transaction.

use crate::core::MethodCategory;

pub const API_READ: &[&str] = &[
    "countBy",
    "sum",
    "average",
    "minimum",
    "maximum",
    "findBy",
    "findAndCountBy",
    "findOneBy",
    "findOneByOrFail",
    "count",
    "exist",
    "find",
    "findAndCount",
    "findOne",
    "findOneOrFail",
    "findByIds",
    "findOneByIds",
];

pub const API_WRITE: &[&str] = &[
    "clear",
    "create",
    "insert",
    "merge",
    "preload",
    "save",
    "softRemove",
    "recover",
    "remove",
    "upsert",
    "update",
    "delete",
    "increment",
    "decrement",
    "softDelete",
    "restore",
];

pub const API_OTHER: &[&str] = &["createQueryBuilder", "query"];

pub const API_TRANSACTION: &[&str] = &["transaction", "startTransaction"];

/// Classify a method name against the repository API surface.
///
/// Returns `None` for names outside the fixed vocabulary; callers skip the
/// node in that case.
pub fn classify(name: &str) -> Option<MethodCategory> {
    static TABLES: &[(&[&str], MethodCategory)] = &[
        (API_READ, MethodCategory::Read),
        (API_WRITE, MethodCategory::Write),
        (API_OTHER, MethodCategory::Other),
        (API_TRANSACTION, MethodCategory::Transaction),
    ];

    TABLES
        .iter()
        .find(|(names, _)| names.contains(&name))
        .map(|(_, category)| *category)
}
