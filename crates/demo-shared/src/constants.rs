//! Application-wide constants

pub const DEFAULT_APP_NAME: &str = "invoice-demo";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

pub const DEFAULT_PROCESS_KEY: &str = "invoice";
pub const DEFAULT_INVOICE_DOCUMENT: &str = "resources/invoice.pdf";
pub const DEFAULT_METRICS_REPORTER_ID: &str = "REPORTER";

pub const DEFAULT_LOG_FILTER: &str = "info";
