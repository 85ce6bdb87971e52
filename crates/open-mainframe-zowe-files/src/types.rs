//! z/OSMF dataset request and response types.

use serde::{Deserialize, Serialize};

/// Options for `POST /zosmf/restfiles/ds/{dsn}` (dataset allocation).
///
/// Every field is optional. Only fields that are set are sent, under the
/// option's own name. [`AllocationOptions::default`] carries the usual z/OSMF
/// defaults (`PS`, `TRK`, 1/1 tracks, `FB` 80/27920); start from
/// [`AllocationOptions::empty`] to send nothing but what you set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationOptions {
    /// Volume serial.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volser: Option<String>,
    /// Device type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Dataset organization (PS, PO).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dsorg: Option<String>,
    /// Allocation unit (TRK, CYL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alcunit: Option<String>,
    /// Primary space allocation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<u32>,
    /// Secondary space allocation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<u32>,
    /// Number of directory blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dirblk: Option<u32>,
    /// Average block size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avgblk: Option<u32>,
    /// Record format (F, FB, V, VB, U).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recfm: Option<String>,
    /// Block size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blksize: Option<u32>,
    /// Logical record length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lrecl: Option<u32>,
    /// SMS storage class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storclass: Option<String>,
    /// SMS management class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mgntclass: Option<String>,
    /// SMS data class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataclass: Option<String>,
    /// Dataset type (LIBRARY, PDS, BASIC, LARGE).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dsntype: Option<String>,
    /// Model dataset to copy attributes from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like: Option<String>,
}

impl Default for AllocationOptions {
    fn default() -> Self {
        Self {
            dsorg: Some("PS".to_string()),
            alcunit: Some("TRK".to_string()),
            primary: Some(1),
            secondary: Some(1),
            dirblk: Some(0),
            recfm: Some("FB".to_string()),
            blksize: Some(27920),
            lrecl: Some(80),
            ..Self::empty()
        }
    }
}

impl AllocationOptions {
    /// Options with nothing set.
    pub fn empty() -> Self {
        Self {
            volser: None,
            unit: None,
            dsorg: None,
            alcunit: None,
            primary: None,
            secondary: None,
            dirblk: None,
            avgblk: None,
            recfm: None,
            blksize: None,
            lrecl: None,
            storclass: None,
            mgntclass: None,
            dataclass: None,
            dsntype: None,
            like: None,
        }
    }

    /// Place the dataset on this volume serial.
    pub fn volser(mut self, value: impl Into<String>) -> Self {
        self.volser = Some(value.into());
        self
    }

    /// Device type, e.g. `3390`.
    pub fn unit(mut self, value: impl Into<String>) -> Self {
        self.unit = Some(value.into());
        self
    }

    /// Dataset organization: `PS` sequential, `PO` partitioned.
    pub fn dsorg(mut self, value: impl Into<String>) -> Self {
        self.dsorg = Some(value.into());
        self
    }

    /// Space unit for primary/secondary: `TRK` or `CYL`.
    pub fn alcunit(mut self, value: impl Into<String>) -> Self {
        self.alcunit = Some(value.into());
        self
    }

    /// Primary space quantity, in `alcunit`s.
    pub fn primary(mut self, value: u32) -> Self {
        self.primary = Some(value);
        self
    }

    /// Secondary space quantity, in `alcunit`s.
    pub fn secondary(mut self, value: u32) -> Self {
        self.secondary = Some(value);
        self
    }

    /// Directory blocks; only meaningful for a PDS.
    pub fn dirblk(mut self, value: u32) -> Self {
        self.dirblk = Some(value);
        self
    }

    /// Average block size, when allocating in blocks.
    pub fn avgblk(mut self, value: u32) -> Self {
        self.avgblk = Some(value);
        self
    }

    /// Record format (`F`, `FB`, `V`, `VB`, `U`).
    pub fn recfm(mut self, value: impl Into<String>) -> Self {
        self.recfm = Some(value.into());
        self
    }

    /// Block size in bytes.
    pub fn blksize(mut self, value: u32) -> Self {
        self.blksize = Some(value);
        self
    }

    /// Logical record length in bytes.
    pub fn lrecl(mut self, value: u32) -> Self {
        self.lrecl = Some(value);
        self
    }

    /// SMS storage class.
    pub fn storclass(mut self, value: impl Into<String>) -> Self {
        self.storclass = Some(value.into());
        self
    }

    /// SMS management class.
    pub fn mgntclass(mut self, value: impl Into<String>) -> Self {
        self.mgntclass = Some(value.into());
        self
    }

    /// SMS data class.
    pub fn dataclass(mut self, value: impl Into<String>) -> Self {
        self.dataclass = Some(value.into());
        self
    }

    /// Dataset type: `LIBRARY` (PDSE), `PDS`, `BASIC` or `LARGE`.
    pub fn dsntype(mut self, value: impl Into<String>) -> Self {
        self.dsntype = Some(value.into());
        self
    }

    /// Copy unspecified attributes from this model dataset.
    pub fn like(mut self, value: impl Into<String>) -> Self {
        self.like = Some(value.into());
        self
    }

    /// JSON request body holding only the set options.
    pub fn to_payload(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// A PDS member entry from `GET /zosmf/restfiles/ds/{dsn}/member`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberListItem {
    /// Member name.
    pub member: String,
    /// Version number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vers: Option<u32>,
    /// Modification level.
    #[serde(default, rename = "mod", skip_serializing_if = "Option::is_none")]
    pub modification: Option<u32>,
    /// Created date (4-digit year).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c4date: Option<String>,
    /// Modified date (4-digit year).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m4date: Option<String>,
    /// Current number of records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cnorc: Option<u32>,
    /// Initial number of records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inorc: Option<u32>,
    /// User ID of the last change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Every other attribute z/OSMF returned (`mtime`, `sclm`, load-module
    /// `amode`/`rmode`/`ttr`, ...), kept as received.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_payload() {
        let payload = AllocationOptions::default().to_payload().unwrap();
        assert_eq!(
            payload,
            json!({
                "dsorg": "PS",
                "alcunit": "TRK",
                "primary": 1,
                "secondary": 1,
                "dirblk": 0,
                "recfm": "FB",
                "blksize": 27920,
                "lrecl": 80,
            })
        );
    }

    #[test]
    fn test_overrides_keep_other_defaults() {
        let payload = AllocationOptions::default()
            .primary(10)
            .recfm("VB")
            .to_payload()
            .unwrap();
        assert_eq!(payload["primary"], 10);
        assert_eq!(payload["recfm"], "VB");
        assert_eq!(payload["dsorg"], "PS");
        assert_eq!(payload["lrecl"], 80);
        assert!(payload.get("volser").is_none());
        assert!(payload.get("like").is_none());
    }

    #[test]
    fn test_empty_payload_only_has_set_fields() {
        assert_eq!(AllocationOptions::empty().to_payload().unwrap(), json!({}));

        let payload = AllocationOptions::empty()
            .volser("WORK01")
            .dsntype("LIBRARY")
            .avgblk(800)
            .like("IBMUSER.MODEL")
            .to_payload()
            .unwrap();
        assert_eq!(
            payload,
            json!({"volser": "WORK01", "avgblk": 800, "dsntype": "LIBRARY", "like": "IBMUSER.MODEL"})
        );
    }

    #[test]
    fn test_every_option_uses_its_own_name() {
        let options = AllocationOptions::empty()
            .volser("V")
            .unit("3390")
            .dsorg("PO")
            .alcunit("CYL")
            .primary(5)
            .secondary(2)
            .dirblk(10)
            .avgblk(100)
            .recfm("U")
            .blksize(6144)
            .lrecl(0)
            .storclass("SC")
            .mgntclass("MC")
            .dataclass("DC")
            .dsntype("PDS")
            .like("M.D");
        let payload = options.to_payload().unwrap();
        let mut keys: Vec<_> = payload.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "alcunit", "avgblk", "blksize", "dataclass", "dirblk", "dsntype", "dsorg", "like",
                "lrecl", "mgntclass", "primary", "recfm", "secondary", "storclass", "unit", "volser",
            ]
        );
    }

    #[test]
    fn test_member_item_deserialization() {
        let item: MemberListItem = serde_json::from_value(json!({
            "member": "PROG1",
            "vers": 1,
            "mod": 3,
            "user": "IBMUSER",
            "sclm": "N"
        }))
        .unwrap();
        assert_eq!(item.member, "PROG1");
        assert_eq!(item.modification, Some(3));
        assert_eq!(item.user.as_deref(), Some("IBMUSER"));
        assert!(item.c4date.is_none());

        assert_eq!(item.extra.get("sclm"), Some(&json!("N")));

        let bare: MemberListItem = serde_json::from_value(json!({"member": "A"})).unwrap();
        assert_eq!(bare.vers, None);
        assert!(bare.extra.is_empty());
    }

    #[test]
    fn test_member_items_keep_every_attribute() {
        let raw = json!([
            {"member": "IEFBR14", "amode": "31", "rmode": "ANY", "size": "000002", "ttr": "00000B"},
            {"member": "PROGA", "vers": 1, "mod": 0, "mtime": "12:01", "msec": "33", "mnorc": 0, "sclm": "N"}
        ]);
        let items: Vec<MemberListItem> = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(items[0].extra.get("amode"), Some(&json!("31")));
        assert_eq!(items[1].modification, Some(0));
        assert_eq!(serde_json::to_value(&items).unwrap(), raw);
    }
}
