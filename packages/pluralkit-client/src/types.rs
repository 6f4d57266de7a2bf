use serde::{Deserialize, Serialize};

/// A member as returned by `GET /systems/@me/members`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Member {
    /// Five or six letter short id.
    pub id: String,
    pub uuid: String,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub pronouns: Option<String>,
    pub avatar_url: Option<String>,
    pub description: Option<String>,
    /// Hex color without leading `#`.
    pub color: Option<String>,
}

impl Member {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn pronouns(&self) -> Option<&str> {
        self.pronouns.as_deref()
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Fixed list of fields rendered in logs.
    pub fn display_fields(&self) -> [(&'static str, Option<&str>); 8] {
        [
            ("id", Some(self.id())),
            ("uuid", Some(self.uuid())),
            ("name", self.name()),
            ("display_name", self.display_name()),
            ("pronouns", self.pronouns()),
            ("color", self.color()),
            ("avatar_url", self.avatar_url()),
            ("description", self.description()),
        ]
    }
}

/// Body of `PATCH /members/{id}`.
///
/// `id`, `uuid`, `color` and `keep_proxy` are always sent; the profile fields
/// only when set. `color` echoes the member's current value unless replaced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MemberPatch {
    pub id: String,
    pub uuid: String,
    pub color: Option<String>,
    pub keep_proxy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronouns: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MemberPatch {
    /// Empty patch for `member`: identifiers, its current color, `keep_proxy: false`.
    pub fn for_member(member: &Member) -> Self {
        Self {
            id: member.id.clone(),
            uuid: member.uuid.clone(),
            color: member.color.clone(),
            keep_proxy: false,
            ..Default::default()
        }
    }
}

/// Body of `POST /systems/@me/switches`.
#[derive(Debug, Serialize)]
pub(crate) struct SwitchRequest<'a> {
    pub members: &'a [String],
}

/// Response of `GET /systems/@me/fronters`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct FrontersResponse {
    #[serde(default)]
    pub members: Vec<FronterRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FronterRef {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn member() -> Member {
        Member {
            id: "abcde".into(),
            uuid: "0b7b6d7e-0000-4000-8000-000000000001".into(),
            name: Some("Alex".into()),
            color: Some("112233".into()),
            ..Default::default()
        }
    }

    #[test]
    fn empty_patch_carries_identity_and_current_color() {
        let patch = MemberPatch::for_member(&member());

        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({
                "id": "abcde",
                "uuid": "0b7b6d7e-0000-4000-8000-000000000001",
                "color": "112233",
                "keep_proxy": false
            })
        );
    }

    #[test]
    fn patch_serializes_only_set_profile_fields() {
        let mut patch = MemberPatch::for_member(&Member {
            color: None,
            ..member()
        });
        patch.pronouns = Some("they/them".into());

        let value = serde_json::to_value(&patch).unwrap();

        assert_eq!(value["pronouns"], "they/them");
        assert_eq!(value["color"], serde_json::Value::Null);
        assert!(value.get("description").is_none());
        assert!(value.get("display_name").is_none());
    }

    #[test]
    fn parses_member_with_nulls() {
        let member: Member = serde_json::from_value(json!({
            "id": "abcde",
            "uuid": "u-1",
            "name": "Alex",
            "display_name": null,
            "pronouns": null,
            "color": "ff0000",
            "proxy_tags": []
        }))
        .unwrap();

        assert_eq!(member.display_name(), None);
        assert_eq!(member.color(), Some("ff0000"));
        assert_eq!(member.description(), None);
    }
}
