// Copyright 2026 the Delegate Value Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Persistence refusal.
//!
//! Delegates hold receiver identities and native call handles that are meaningless outside the
//! running process. Both serde directions fail with [`DelegateError::NotSupported`] instead of
//! producing partial data.

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{self, Serialize, Serializer};

use crate::delegate::{DelegateError, DelegateValue};

impl Serialize for DelegateValue {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(ser::Error::custom(DelegateError::NotSupported))
    }
}

impl<'de> Deserialize<'de> for DelegateValue {
    fn deserialize<D: Deserializer<'de>>(_deserializer: D) -> Result<Self, D::Error> {
        Err(de::Error::custom(DelegateError::NotSupported))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use crate::delegate::{DelegateType, DelegateTypeId, DelegateValue};
    use crate::target::{CallHandle, CallableTarget};
    use std::string::ToString;

    #[test]
    fn serialize_fails_with_not_supported() {
        let ty = DelegateType::new(DelegateTypeId(1), "Action");
        let single = ty.bind(CallableTarget::bind_static(CallHandle(1)));
        let multi = single.combine(&single).unwrap();

        for value in [&single, &multi] {
            let err = serde_json::to_string(value).unwrap_err();
            assert_eq!(
                err.to_string(),
                "serialization of delegates is not supported"
            );
        }
    }

    #[test]
    fn deserialize_fails_with_not_supported() {
        let err = serde_json::from_str::<DelegateValue>("{}").unwrap_err();
        assert!(
            err.to_string()
                .starts_with("serialization of delegates is not supported"),
            "unexpected error: {err}"
        );
    }
}
