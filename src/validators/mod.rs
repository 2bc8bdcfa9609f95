//! Validators for the values that end up inside notification URLs: hosts,
//! IP literals, email addresses, phone numbers and UUIDs.
//!
//! Every validator returns `None` or `false` for input it does not accept;
//! none of them panic or return errors.

pub mod contact;
pub mod host;
pub mod text;

pub use contact::{is_email, is_phone_no, is_phone_no_min, EmailResult, PhoneResult, PHONE_MIN_LEN};
pub use host::{is_hostname, is_hostname_with, is_ipaddr, is_ipv4, is_ipv6, HostnameOptions};
pub use text::{is_uuid, parse_bool, parse_bool_value, validate_regex, validate_regex_with, RegexOptions};
