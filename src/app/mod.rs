pub mod ports;
pub mod generate_use_case;
pub mod process_use_case;
pub mod bulk_send_use_case;
pub mod send_sms_use_case;
