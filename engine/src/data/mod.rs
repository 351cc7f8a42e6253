pub mod cell;
pub mod columns;
pub mod workbook;
