pub mod field_conversion;
