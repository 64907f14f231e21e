//! # Discriminated-union codec
//!
//! Wire objects of the remote API carry a reserved discriminator key whose
//! value selects the concrete shape of the rest of the object. This module
//! provides the two halves of that contract:
//!
//! - [`encode`] serializes a variant into an intermediate [`Object`],
//!   unconditionally writes the discriminator and re-serializes the object.
//!   The discriminator therefore cannot be omitted or overridden by the value
//!   itself.
//! - [`decode`] reads the base shape, reads the discriminator from a generic
//!   map, dispatches to the matching variant and merges the base shape back
//!   into it. Unknown discriminators are a hard error.
//!
//! A union plugs into the codec by implementing [`DiscriminatedUnion`].

mod object;

pub use object::{
    canonicalize, decode_field, inject_nested_tag, inject_tag, merge_base_fields,
    read_discriminator, to_object, BaseFields, Object, ROOT_FIELD,
};

use serde::de::DeserializeOwned;
use tracing::trace;

use crate::errors::{Error, Result};

/// A closed set of wire shapes selected by a discriminator key.
pub trait DiscriminatedUnion: Sized {
    /// Union name used in diagnostics
    const UNION: &'static str;

    /// Reserved key carrying the discriminator
    const DISCRIMINATOR_KEY: &'static str;

    /// Fields shared by every variant, decoded before dispatch
    type Base: DeserializeOwned;

    /// Fixed discriminator value of this variant
    fn discriminator(&self) -> &'static str;

    /// First encoding pass: the variant as a generic object.
    ///
    /// The discriminator key does not need to be written here; [`encode`]
    /// always overwrites it.
    fn to_intermediate(&self) -> Result<Object>;

    /// Build the concrete variant selected by `discriminator`.
    ///
    /// Must fail with [`Error::UnknownDiscriminator`] for values that select
    /// no variant.
    fn dispatch(discriminator: &str, object: &Object) -> Result<Self>;

    /// Fold the separately decoded base shape into the variant
    fn merge_base(&mut self, base: Self::Base);
}

/// Encode a union value to wire bytes.
pub fn encode<U: DiscriminatedUnion>(value: &U) -> Result<Vec<u8>> {
    let _span = crate::codec_span!("encode", U::UNION).entered();

    let mut intermediate = value.to_intermediate()?;
    inject_tag(&mut intermediate, U::DISCRIMINATOR_KEY, value.discriminator());

    trace!(
        union = U::UNION,
        discriminator = value.discriminator(),
        keys = intermediate.len(),
        "encoding discriminated union"
    );

    serde_json::to_vec(&intermediate)
        .map_err(|err| Error::encoding_with_source(format!("re-marshaling {}", U::UNION), err))
}

/// Decode wire bytes into the concrete variant named by the discriminator.
pub fn decode<U: DiscriminatedUnion>(bytes: &[u8]) -> Result<U> {
    let _span = crate::codec_span!("decode", U::UNION, bytes = bytes.len()).entered();

    let base: U::Base =
        serde_json::from_slice(bytes).map_err(|err| Error::decode(U::UNION, ROOT_FIELD, err))?;

    let object: Object =
        serde_json::from_slice(bytes).map_err(|err| Error::decode(U::UNION, ROOT_FIELD, err))?;
    let discriminator = read_discriminator(&object, U::UNION, U::DISCRIMINATOR_KEY)?;

    trace!(union = U::UNION, discriminator = %discriminator, "dispatching discriminated union");

    let mut variant = U::dispatch(&discriminator, &object)?;
    variant.merge_base(base);
    Ok(variant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    // A second union shape: discriminator at the top level, no nested payload.
    const BY_ID: &str = "LookupById";
    const BY_TIME: &str = "LookupByTime";

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct IdLookup {
        item_id: String,
        #[serde(skip)]
        base: BaseFields,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct TimeLookup {
        point_in_time: String,
        #[serde(skip)]
        base: BaseFields,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Lookup {
        ById(IdLookup),
        ByTime(TimeLookup),
    }

    impl DiscriminatedUnion for Lookup {
        const UNION: &'static str = "Lookup";
        const DISCRIMINATOR_KEY: &'static str = "kind";
        type Base = BaseFields;

        fn discriminator(&self) -> &'static str {
            match self {
                Self::ById(_) => BY_ID,
                Self::ByTime(_) => BY_TIME,
            }
        }

        fn to_intermediate(&self) -> Result<Object> {
            let (mut object, base) = match self {
                Self::ById(v) => (to_object(v, BY_ID)?, &v.base),
                Self::ByTime(v) => (to_object(v, BY_TIME)?, &v.base),
            };
            merge_base_fields(&mut object, base);
            Ok(object)
        }

        fn dispatch(discriminator: &str, object: &Object) -> Result<Self> {
            match discriminator {
                BY_ID => Ok(Self::ById(IdLookup {
                    item_id: decode_field(object, "itemId", BY_ID)?,
                    base: BaseFields::default(),
                })),
                BY_TIME => Ok(Self::ByTime(TimeLookup {
                    point_in_time: decode_field(object, "pointInTime", BY_TIME)?,
                    base: BaseFields::default(),
                })),
                other => Err(Error::unknown_discriminator(Self::UNION, Self::DISCRIMINATOR_KEY, other)),
            }
        }

        fn merge_base(&mut self, base: BaseFields) {
            match self {
                Self::ById(v) => v.base = base.without(&["kind", "itemId"]),
                Self::ByTime(v) => v.base = base.without(&["kind", "pointInTime"]),
            }
        }
    }

    fn by_id(id: &str) -> Lookup {
        Lookup::ById(IdLookup {
            item_id: id.into(),
            base: BaseFields::default(),
        })
    }

    #[test]
    fn encode_injects_discriminator() {
        let bytes = encode(&by_id("item-1")).expect("encode");
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, json!({ "kind": BY_ID, "itemId": "item-1" }));
    }

    #[test]
    fn encode_overrides_discriminator_carried_in_base() {
        let mut request = by_id("item-1");
        if let Lookup::ById(v) = &mut request {
            v.base.fields.insert("kind".into(), json!("SomethingElse"));
        }

        let bytes = encode(&request).expect("encode");
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["kind"], BY_ID);
    }

    #[test]
    fn decode_dispatches_on_discriminator() {
        let payload = br#"{"kind":"LookupByTime","pointInTime":"2022-04-01T00:00:00Z"}"#;
        let decoded: Lookup = decode(payload).expect("decode");
        assert_eq!(
            decoded,
            Lookup::ByTime(TimeLookup {
                point_in_time: "2022-04-01T00:00:00Z".into(),
                base: BaseFields::default(),
            })
        );
    }

    #[test]
    fn decode_keeps_unconsumed_base_fields() {
        let payload = br#"{"kind":"LookupById","itemId":"item-9","source":"/stores/x"}"#;
        let decoded: Lookup = decode(payload).expect("decode");

        match &decoded {
            Lookup::ById(v) => {
                assert_eq!(v.base.fields.len(), 1);
                assert_eq!(v.base.fields["source"], "/stores/x");
            }
            other => panic!("unexpected variant: {other:?}"),
        }

        let encoded = encode(&decoded).expect("encode");
        assert_eq!(canonicalize(&encoded).unwrap(), canonicalize(payload).unwrap());
    }

    #[test]
    fn unknown_discriminator_is_fatal() {
        let err = decode::<Lookup>(br#"{"kind":"Nope","itemId":"x"}"#)
            .expect_err("unknown discriminator");
        assert!(matches!(err, Error::UnknownDiscriminator { ref value, .. } if value == "Nope"));
    }

    #[test]
    fn malformed_payloads_are_decode_errors() {
        let err = decode::<Lookup>(b"[1,2]").expect_err("array payload");
        assert_eq!(err.field(), Some(ROOT_FIELD));

        let err = decode::<Lookup>(br#"{"itemId":"x"}"#)
            .expect_err("missing discriminator");
        assert_eq!(err.field(), Some("kind"));

        let err = decode::<Lookup>(
            br#"{"kind":"LookupById","itemId":5}"#,
        )
        .expect_err("wrong field type");
        assert_eq!(err.field(), Some("itemId"));
    }
}
