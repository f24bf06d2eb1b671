//! Projection of generic rows onto the purchase-list record.

use crate::cell::CellValue;
use crate::rows::{GenericRow, SEQUENCE_KEY};
use serde::Serialize;

/// Source header of each record field.
pub mod columns {
    pub const PURCHASE_DATE: &str = "采购日期";
    pub const ITEM_NAME: &str = "物品名称";
    pub const EXPENSE_TYPE: &str = "费用类型";
    pub const DEPARTMENT: &str = "使用部门";
    pub const PURPOSE: &str = "用途摘要";
    pub const QUANTITY: &str = "数量";
    pub const UNIT: &str = "单位";
    pub const UNIT_PRICE: &str = "单价";
    pub const AMOUNT: &str = "金额";
    pub const PHOTO: &str = "照片";
    pub const REMARK: &str = "备注";
}

/// One purchase-list line. Every field is optional: a missing column or a
/// value that does not coerce leaves the field empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub serial_number: Option<i64>,
    pub purchase_date: Option<String>,
    pub item_name: Option<String>,
    pub expense_type: Option<String>,
    pub department: Option<String>,
    pub purpose: Option<String>,
    pub quantity: Option<i64>,
    pub unit: Option<String>,
    pub unit_price: Option<f64>,
    pub amount: Option<f64>,
    pub photo_url: Option<String>,
    pub remark: Option<String>,
}

/// String form of a field; an empty string stays empty.
pub fn string_field(row: &GenericRow, key: &str) -> Option<String> {
    match row.get(key)? {
        CellValue::Null => None,
        value => Some(value.to_string()),
    }
}

/// Integer form of a field: numbers truncate, text must parse as an integer.
pub fn int_field(row: &GenericRow, key: &str) -> Option<i64> {
    match row.get(key)? {
        CellValue::Null => None,
        CellValue::Int(i) => Some(*i),
        CellValue::Float(f) => Some(f.trunc() as i64),
        value => value.to_string().parse().ok(),
    }
}

/// Floating-point form of a field: numbers convert, text must parse.
pub fn float_field(row: &GenericRow, key: &str) -> Option<f64> {
    match row.get(key)? {
        CellValue::Null => None,
        value => value
            .as_number()
            .or_else(|| value.to_string().trim().parse().ok()),
    }
}

impl Record {
    /// Build a record from a generic row by header name.
    #[must_use]
    pub fn from_row(row: &GenericRow) -> Self {
        Record {
            serial_number: int_field(row, SEQUENCE_KEY),
            purchase_date: string_field(row, columns::PURCHASE_DATE),
            item_name: string_field(row, columns::ITEM_NAME),
            expense_type: string_field(row, columns::EXPENSE_TYPE),
            department: string_field(row, columns::DEPARTMENT),
            purpose: string_field(row, columns::PURPOSE),
            quantity: int_field(row, columns::QUANTITY),
            unit: string_field(row, columns::UNIT),
            unit_price: float_field(row, columns::UNIT_PRICE),
            amount: float_field(row, columns::AMOUNT),
            photo_url: string_field(row, columns::PHOTO),
            remark: string_field(row, columns::REMARK),
        }
    }
}

/// Project every generic row onto a record, in order.
pub fn project_records(rows: &[GenericRow]) -> Vec<Record> {
    rows.iter().map(Record::from_row).collect()
}
