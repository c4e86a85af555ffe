//! Helper macro generating the port error enums.
//!
//! Every variant gets a `thiserror` message and a snake_case constructor that
//! accepts anything convertible into the field types, so adapters can write
//! `CartApiError::transport(err.to_string())`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructor and message coverage for generated port errors.
    define_port_error! {
        pub enum SampleStorageError {
            Unavailable => "storage unavailable",
            Quota { key: String } => "quota exceeded writing {key}",
            Corrupt { key: String, bytes: usize } => "corrupt value under {key} ({bytes} bytes)",
        }
    }

    #[test]
    fn unit_variants_get_zero_argument_constructors() {
        assert_eq!(
            SampleStorageError::unavailable().to_string(),
            "storage unavailable"
        );
    }

    #[test]
    fn string_fields_accept_str_slices() {
        let err = SampleStorageError::quota("carrinho_temp");
        assert_eq!(err.to_string(), "quota exceeded writing carrinho_temp");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = SampleStorageError::corrupt("carrinho_temp", 12_usize);
        assert_eq!(
            err,
            SampleStorageError::Corrupt {
                key: "carrinho_temp".to_owned(),
                bytes: 12,
            }
        );
        assert_eq!(err.to_string(), "corrupt value under carrinho_temp (12 bytes)");
    }
}
