pub mod simulated_notifier;
pub mod textbee_gateway;
pub mod throttle_adapter;
