/// Define a text-valued enumeration that mirrors a `CHECK`-constrained
/// `TEXT` column.
///
/// Generates the enum (serialized as its database string), an `ALL` slice,
/// `as_str`, `from_str_value`, `label`, and a `Display` impl.
macro_rules! define_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($field:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $value)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// The database string value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $value ),+
                }
            }

            /// Parse from a database string value.
            pub fn from_str_value(s: &str) -> Result<Self, $crate::error::CoreError> {
                match s {
                    $( $value => Ok(Self::$variant), )+
                    _ => Err($crate::error::CoreError::Validation(format!(
                        "Invalid {} '{}'. Must be one of: {}",
                        $field,
                        s,
                        [$( $value ),+].join(", ")
                    ))),
                }
            }

            /// Human-readable label (underscores become spaces).
            pub fn label(&self) -> String {
                self.as_str().replace('_', " ")
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}
