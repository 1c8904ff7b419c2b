pub mod csv_codec;
pub mod query;
pub mod validation;

pub use csv_codec::{export_records_csv, parse_bulk_csv, BulkRow, CSV_TEMPLATE};
pub use query::{
    is_duplicate, page_slice, total_pages, verify_certificate, RecordFilter, RecordStats,
    StatusFilter, Verification,
};
pub use validation::{is_valid_email, validate_form, FieldErrors, FormField};
