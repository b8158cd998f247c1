//! Argument marshalling: parameter records -> ordered command-line tokens.
//!
//! Every record declares its field-to-flag bindings statically, either with
//! [`param_record!`](crate::param_record) or a hand-written [`ToArgs`] impl
//! built on [`ArgList`]. Rendering walks the bindings in declaration order and
//! emits `<flag><value>` for every field that is set:
//!
//!   - plain values are unset at their zero value (`""`, `0`, `false`);
//!   - `Option<T>` is unset only when `None`, so `Some(0)` is emitted;
//!   - [`ArgList::always`] emits regardless of value.
//!
//! Rendering is pure and total: the same record always yields the same tokens.

/// A value that can be rendered after a flag name.
pub trait ArgValue {
    /// Whether the value counts as "absent" and its flag should be skipped.
    fn is_unset(&self) -> bool;

    /// Textual form placed right after the flag name.
    fn to_arg(&self) -> String;
}

macro_rules! impl_arg_value_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl ArgValue for $t {
                fn is_unset(&self) -> bool {
                    *self == 0
                }

                fn to_arg(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_arg_value_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl ArgValue for bool {
    fn is_unset(&self) -> bool {
        !*self
    }

    fn to_arg(&self) -> String {
        self.to_string()
    }
}

impl ArgValue for str {
    fn is_unset(&self) -> bool {
        self.is_empty()
    }

    fn to_arg(&self) -> String {
        self.to_string()
    }
}

impl ArgValue for String {
    fn is_unset(&self) -> bool {
        self.is_empty()
    }

    fn to_arg(&self) -> String {
        self.clone()
    }
}

impl<T: ArgValue + ?Sized> ArgValue for &T {
    fn is_unset(&self) -> bool {
        (**self).is_unset()
    }

    fn to_arg(&self) -> String {
        (**self).to_arg()
    }
}

impl<T: ArgValue> ArgValue for Option<T> {
    fn is_unset(&self) -> bool {
        self.is_none()
    }

    fn to_arg(&self) -> String {
        self.as_ref().map(ArgValue::to_arg).unwrap_or_default()
    }
}

/// Ordered token accumulator used by [`ToArgs`] implementations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgList {
    tokens: Vec<String>,
}

impl ArgList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `<name><value>` unless the value is unset.
    pub fn flag<V: ArgValue + ?Sized>(mut self, name: &str, value: &V) -> Self {
        if !value.is_unset() {
            self.tokens.push(format!("{name}{}", value.to_arg()));
        }
        self
    }

    /// Append `<name><value>` even when the value is at its zero value.
    pub fn always<V: ArgValue + ?Sized>(mut self, name: &str, value: &V) -> Self {
        self.tokens.push(format!("{name}{}", value.to_arg()));
        self
    }

    /// Append a standalone token (address, path, ...) unless it is unset.
    pub fn positional<V: ArgValue + ?Sized>(mut self, value: &V) -> Self {
        if !value.is_unset() {
            self.tokens.push(value.to_arg());
        }
        self
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tokens
    }
}

/// A parameter record with statically declared flag bindings.
pub trait ToArgs {
    fn to_args(&self) -> ArgList;
}

impl ToArgs for () {
    fn to_args(&self) -> ArgList {
        ArgList::new()
    }
}

/// Render a record into its command-line tokens.
pub fn render<P: ToArgs + ?Sized>(record: &P) -> Vec<String> {
    record.to_args().into_vec()
}

/// Declare a parameter record struct together with its flag table.
///
/// ```
/// boostwrap::param_record! {
///     #[derive(Debug, Default)]
///     pub struct AskArgs {
///         pub provider: String => "--provider=",
///         pub size: u64 => "--size=",
///     }
/// }
///
/// let args = AskArgs { provider: "f01234".into(), size: 0 };
/// assert_eq!(boostwrap::args::render(&args), vec!["--provider=f01234"]);
/// ```
#[macro_export]
macro_rules! param_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty => $flag:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::args::ToArgs for $name {
            fn to_args(&self) -> $crate::args::ArgList {
                $crate::args::ArgList::new()
                    $( .flag($flag, &self.$field) )*
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::param_record! {
        #[derive(Debug, Clone, Default)]
        struct Sample {
            provider: String => "--provider=",
            piece_size: u64 => "--piece-size=",
            start_epoch: i64 => "--start-epoch=",
            verified: bool => "--verified=",
        }
    }

    crate::param_record! {
        #[derive(Debug, Default)]
        struct Optional {
            epoch: Option<i64> => "--start-epoch=",
            label: Option<String> => "--label=",
        }
    }

    #[test]
    fn zero_fields_are_skipped() {
        let s = Sample {
            provider: "f01234".into(),
            piece_size: 0,
            verified: true,
            ..Default::default()
        };
        assert_eq!(render(&s), vec!["--provider=f01234", "--verified=true"]);
    }

    #[test]
    fn all_zero_record_renders_empty() {
        assert!(render(&Sample::default()).is_empty());
    }

    #[test]
    fn declaration_order_is_kept() {
        let s = Sample {
            provider: "p".into(),
            piece_size: 2048,
            start_epoch: -5,
            verified: true,
        };
        assert_eq!(
            render(&s),
            vec![
                "--provider=p",
                "--piece-size=2048",
                "--start-epoch=-5",
                "--verified=true"
            ]
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let s = Sample {
            provider: "f0".into(),
            piece_size: 1,
            start_epoch: 2,
            verified: false,
        };
        assert_eq!(render(&s), render(&s.clone()));
    }

    #[test]
    fn strings_are_not_escaped() {
        let s = Sample {
            provider: "a b=\"c\"".into(),
            ..Default::default()
        };
        assert_eq!(render(&s), vec!["--provider=a b=\"c\""]);
    }

    #[test]
    fn option_distinguishes_absent_from_zero() {
        assert!(render(&Optional::default()).is_empty());

        let o = Optional {
            epoch: Some(0),
            label: Some(String::new()),
        };
        assert_eq!(render(&o), vec!["--start-epoch=0", "--label="]);
    }

    #[test]
    fn builder_always_and_positional() {
        let list = ArgList::new()
            .always("--id=", &false)
            .flag("--wallet=", "")
            .positional("f1abc")
            .positional("");
        assert_eq!(list.len(), 2);
        assert_eq!(list.into_vec(), vec!["--id=false", "f1abc"]);
    }

    #[test]
    fn unit_renders_nothing() {
        assert!(render(&()).is_empty());
    }
}
