/* Member table declaration macros.
 *
 * introspect! writes the Introspect impl for a type: one table row per
 * declared member, carrying the erased accessors and the typed accessor
 * pair. It must be invoked somewhere the listed fields are visible,
 * which is what lets a schema expose non-public members. Field types
 * must implement MemberValue and Clone. */

#[macro_export]
macro_rules! introspect {
    (@access pub) => {
        $crate::Accessibility::Public
    };
    (@access priv) => {
        $crate::Accessibility::NonPublic
    };
    ($owner:ty as $name:literal { $( $vis:tt $field:ident : $vty:ty ),+ $(,)? }) => {
        impl $crate::Introspect for $owner {
            fn type_name() -> &'static str {
                $name
            }

            fn members() -> &'static [$crate::MemberEntry] {
                static MEMBERS: &[$crate::MemberEntry] = &[
                    $(
                        $crate::MemberEntry {
                            name: stringify!($field),
                            kind: <$vty as $crate::MemberValue>::KIND,
                            accessibility: $crate::introspect!(@access $vis),
                            get: Some(|instance: &dyn ::std::any::Any| {
                                let owner = match instance.downcast_ref::<$owner>() {
                                    Some(owner) => owner,
                                    None => panic!(
                                        "instance is not a {}",
                                        <$owner as $crate::Introspect>::type_name()
                                    ),
                                };
                                $crate::MemberValue::into_value(owner.$field.clone())
                            }),
                            set: Some(|instance: &mut dyn ::std::any::Any, value: $crate::Value| {
                                let owner = match instance.downcast_mut::<$owner>() {
                                    Some(owner) => owner,
                                    None => panic!(
                                        "instance is not a {}",
                                        <$owner as $crate::Introspect>::type_name()
                                    ),
                                };
                                owner.$field = <$vty as $crate::MemberValue>::from_value(value);
                            }),
                            typed: Some(&$crate::TypedMember::<$owner, $vty> {
                                get: Some(|instance: &$owner| instance.$field.clone()),
                                set: Some(|instance: &mut $owner, value: $vty| {
                                    instance.$field = value;
                                }),
                            }),
                        }
                    ),+
                ];
                MEMBERS
            }
        }
    };
}

/* Implements MemberValue for a unit-only enum backed by a 32-bit
 * signed tag. The enum must be #[repr(i32)] and derive
 * num_enum::TryFromPrimitive; decoding a tag that names no variant is
 * a programming error and panics. */
#[macro_export]
macro_rules! member_enum {
    ($ty:ty) => {
        impl $crate::MemberValue for $ty {
            const KIND: $crate::ValueKind = $crate::ValueKind::Enum;

            fn into_value(self) -> $crate::Value {
                $crate::Value::Enum(self as i32)
            }

            fn from_value(value: $crate::Value) -> Self {
                let tag = value.expect_enum();
                match <$ty as $crate::num_enum::TryFromPrimitive>::try_from_primitive(tag) {
                    Ok(variant) => variant,
                    Err(_) => panic!(
                        "tag {} is not a valid {} value",
                        tag,
                        ::std::any::type_name::<$ty>()
                    ),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{introspect, member_enum, AccessFilter, MemberValue, Value, ValueKind};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, num_enum::TryFromPrimitive)]
    #[repr(i32)]
    enum Mode {
        Idle = 0,
        Active = 1,
        Halted = 2,
    }

    member_enum!(Mode);

    #[derive(Debug, Clone, PartialEq)]
    struct Device {
        mode: Mode,
        id: u64,
    }

    introspect! {
        Device as "Device" {
            pub mode: Mode,
            pub id: u64,
        }
    }

    #[test]
    fn enum_member_carries_its_underlying_tag() {
        assert_eq!(Mode::Halted.into_value(), Value::Enum(2));
        assert_eq!(Mode::from_value(Value::Enum(1)), Mode::Active);
    }

    #[test]
    #[should_panic(expected = "is not a valid")]
    fn unknown_enum_tag_panics() {
        Mode::from_value(Value::Enum(99));
    }

    #[test]
    fn declared_members_surface_through_resolution() {
        let descriptor = crate::resolve_member::<Device>("mode", AccessFilter::Public)
            .expect("member resolves");
        assert_eq!(descriptor.kind, ValueKind::Enum);

        let mut device = Device {
            mode: Mode::Idle,
            id: 7,
        };
        let set = descriptor.entry.set.expect("setter donated");
        let get = descriptor.entry.get.expect("getter donated");
        set(&mut device, Value::Enum(2));
        assert_eq!(device.mode, Mode::Halted);
        assert_eq!(get(&device), Value::Enum(2));
    }
}
