/// Default file names, roster data and gateway constants shared by the subcommands.

// Default table paths for each stage
pub const DUMMY_MEMBERS_FILE: &str = "iei_dummy_members.csv";
pub const PROCESSED_MEMBERS_FILE: &str = "iei_processed_members.csv";
pub const STUDENTS_FILE: &str = "students.csv";
pub const CONFIG_FILE: &str = "config.toml";

// Generator
pub const DEFAULT_MEMBER_COUNT: usize = 20;
pub const MEMBERSHIP_PREFIXES: [&str; 5] = ["F-", "M-", "AM", "ST", "T-"];
pub const MEMBERSHIP_BASE_NUMBER: u64 = 1_423_500;
pub const MEMBERSHIP_NUMBER_DIGITS: usize = 7;
pub const PHONE_LEADING_DIGITS: [char; 4] = ['6', '7', '8', '9'];
pub const PHONE_LENGTH: usize = 10;
pub const EMAIL_DOMAIN: &str = "example.com";

/// Fixed roster of (name, department, year) cycled by the generator.
pub const ROSTER: [(&str, &str, &str); 20] = [
    ("Ishwari Shinde", "IT", "FE"),
    ("Atharva Palve", "CS", "SE"),
    ("Vaibhavi Rai", "ELEC", "TE"),
    ("Divine Marshal", "EXTC", "BE"),
    ("Nathan Johncy", "MECH", "SE"),
    ("Prashant Pandita", "EXTC", "TE"),
    ("Abhishek Kumar", "IT", "FE"),
    ("Riya Sharma", "CS", "BE"),
    ("Aditya Patil", "ELEC", "TE"),
    ("Sneha Kulkarni", "MECH", "SE"),
    ("Meera Joshi", "IT", "FE"),
    ("Karan Singh", "CS", "SE"),
    ("Pooja Desai", "EXTC", "BE"),
    ("Rohit Verma", "ELEC", "TE"),
    ("Ananya Gupta", "MECH", "FE"),
    ("Siddharth Naik", "MECH", "BE"),
    ("Tanya Shah", "IT", "SE"),
    ("Harshil Mehta", "CS", "TE"),
    ("Krisha Jain", "ELEC", "BE"),
    ("Mitali Kulkarni", "EXTC", "FE"),
];

// Processor
pub const LAST4_LEN: usize = 4;
pub const PREVIEW_ROWS: usize = 5;

// Simulated bulk send
pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const DEFAULT_BATCH_DELAY_SECS: u64 = 3;

// Live SMS gateway
pub const TEXTBEE_BASE_URL: &str = "https://api.textbee.dev/api/v1";
pub const API_KEY_HEADER: &str = "x-api-key";
pub const API_KEY_ENV: &str = "TEXTBEE_API_KEY";
pub const DEVICE_ID_ENV: &str = "TEXTBEE_DEVICE_ID";
pub const DEFAULT_COUNTRY_PREFIX: &str = "+91";
pub const DEFAULT_PORTAL_URL: &str = "https://portal.college.in";
pub const DEFAULT_SEND_INTERVAL_SECS: u64 = 2;
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 0;

/// Placeholder some spreadsheet exports write for empty phone cells.
pub const NULL_LITERAL: &str = "null";
