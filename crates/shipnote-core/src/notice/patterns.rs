//! Regex patterns for shipment-notice extraction.
//!
//! Digit classes are spelled `[0-9]` so full-width or other Unicode digits
//! never count as a marker, code or quantity.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Pagination furniture, one token each after atomization
    pub static ref PAGE_MARKER_EN: Regex = Regex::new(
        r"(?i)^Page\s*[0-9]+\s*of\s*[0-9]+$"
    ).unwrap();

    pub static ref PAGE_MARKER_ZH: Regex = Regex::new(
        r"^(?:第[0-9]+页共[0-9]+页|第[0-9]+页|共[0-9]+页|[0-9]+页)$"
    ).unwrap();

    pub static ref PAGE_NUMBER: Regex = Regex::new(r"^[0-9]+$").unwrap();

    // Document-level fields, searched in the full text
    pub static ref DELIVERY_DATE: Regex = Regex::new(
        r"通知日期[:：]?\s*([0-9]{2}/[0-9]{2}/[0-9]{4})"
    ).unwrap();

    pub static ref DELIVERY_NOTE_NO: Regex = Regex::new(
        r"(?i)发货通知单号[:：]?\s*(SI[0-9A-Z]{8,})"
    ).unwrap();

    pub static ref CUSTOMER_ORDER_NO: Regex = Regex::new(
        r"(?i)(LS-[0-9A-Z\-]+)"
    ).unwrap();

    // Vendor order number, one pattern per fallback tier
    pub static ref VENDOR_ORDER_LABELED: Regex = Regex::new(
        r"(?i)西门子订单号[:：]?\s*([A-Za-z0-9_\-]{5,15})"
    ).unwrap();

    pub static ref VENDOR_ORDER_CONTEXT: Regex = Regex::new(
        r"(?i)订单号[:：]?\s*([A-Za-z0-9_\-]{5,15}).*?西门子|西门子.*?订单号[:：]?\s*([A-Za-z0-9_\-]{5,15})"
    ).unwrap();

    pub static ref VENDOR_KEYWORD: Regex = Regex::new(r"(?i)Siemens|西门子").unwrap();

    pub static ref VENDOR_OR_ORDER_TOKEN: Regex = Regex::new(r"(?i)Siemens|西门子|订单").unwrap();

    pub static ref CODE_RUN: Regex = Regex::new(r"[A-Za-z0-9_\-]{5,15}").unwrap();

    pub static ref CODE_TOKEN: Regex = Regex::new(r"^[A-Za-z0-9_\-]{5,15}$").unwrap();

    // Line items
    pub static ref SEQUENCE_MARKER: Regex = Regex::new(r"^[0-9]{6}$").unwrap();

    pub static ref PRODUCT_CODE: Regex = Regex::new(r"^[0-9]{8}$").unwrap();

    pub static ref TEMPERATURE_RANGE: Regex = Regex::new(
        r"(?i)([0-9]+[~～\-至to][0-9]+℃)|(\+[0-9]+°C.*?[0-9]+°C)"
    ).unwrap();

    pub static ref REFERENCE_CODE: Regex = Regex::new(r"(?i)^(?:UEG:|REF:)[0-9]+$").unwrap();

    pub static ref REFERENCE_PREFIX: Regex = Regex::new(r"(?i)^(?:UEG:|REF:)").unwrap();

    pub static ref PLAIN_NUMBER: Regex = Regex::new(r"^[0-9]+(?:\.[0-9]+)?$").unwrap();

    pub static ref UNIT_OF_MEASURE: Regex = Regex::new(r"(?i)Piece|件|PCE|pack|盒").unwrap();

    pub static ref DATE_DIGITS: Regex = Regex::new(r"^([0-9]{4})([0-9]{2})([0-9]{2})$").unwrap();

    pub static ref DATE_SLASHED: Regex = Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$").unwrap();

    // Temperature normalization
    pub static ref TEMP_CELSIUS_PAIR: Regex = Regex::new(
        r"(?i)\+?([0-9]+)°C.*?([0-9]+)°C"
    ).unwrap();

    pub static ref TEMP_GENERIC: Regex = Regex::new(r"([0-9]+).*?([0-9]+).*?℃").unwrap();
}
