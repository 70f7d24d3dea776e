#![allow(dead_code)]

/* Shared fixtures for the integration suites */

use access_types::member_enum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, num_enum::TryFromPrimitive)]
#[repr(i32)]
pub enum Priority {
    Low = 0,
    Normal = 1,
    High = 2,
}

member_enum!(Priority);

/* Two public members, the minimal record shape */
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Note {
    pub text: String,
    pub count: i32,
}

access_types::introspect! {
    Note as "Note" {
        pub text: String,
        pub count: i32,
    }
}

/* Carries a member with no codec table entry */
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Telemetry {
    pub name: String,
    pub ratio: f32,
}

access_types::introspect! {
    Telemetry as "Telemetry" {
        pub name: String,
        pub ratio: f32,
    }
}

pub use sealed::Envelope;

/* Envelope lives in its own module so the secret member really is
 * unreachable from the suites except through synthesized accessors */
mod sealed {
    use super::Priority;

    #[derive(Debug, Clone, PartialEq)]
    pub struct Envelope {
        pub subject: String,
        secret: String,
        pub sequence: i32,
        pub timestamp: i64,
        pub weight: f64,
        pub channel: u8,
        pub urgent: bool,
        pub priority: Priority,
    }

    impl Default for Envelope {
        fn default() -> Self {
            Self {
                subject: String::new(),
                secret: String::new(),
                sequence: 0,
                timestamp: 0,
                weight: 0.0,
                channel: 0,
                urgent: false,
                priority: Priority::Low,
            }
        }
    }

    impl Envelope {
        /* In-scope view of the non-public member, for equivalence checks */
        pub fn peek_secret(&self) -> &str {
            &self.secret
        }
    }

    access_types::introspect! {
        Envelope as "Envelope" {
            pub subject: String,
            priv secret: String,
            pub sequence: i32,
            pub timestamp: i64,
            pub weight: f64,
            pub channel: u8,
            pub urgent: bool,
            pub priority: Priority,
        }
    }
}
