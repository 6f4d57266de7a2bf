use serde::{Deserialize, Serialize};

/// A member document as returned by `GET /members/{userId}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Member {
    pub id: String,
    #[serde(default)]
    pub exists: Option<bool>,
    #[serde(default)]
    pub content: MemberContent,
}

/// Profile fields nested under `content`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MemberContent {
    pub name: Option<String>,
    pub private: Option<bool>,
    pub uid: Option<String>,
    #[serde(rename = "avatarUrl")]
    pub avatar_url: Option<String>,
    pub desc: Option<String>,
    pub pronouns: Option<String>,
    pub color: Option<String>,
    /// PluralKit short id this member is linked to.
    #[serde(rename = "pkId")]
    pub pk_id: Option<String>,
}

impl Member {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.content.name.as_deref()
    }

    pub fn is_private(&self) -> bool {
        self.content.private.unwrap_or(false)
    }

    /// Documents flagged `exists: false` have been deleted on the service.
    pub fn is_deleted(&self) -> bool {
        self.exists == Some(false)
    }

    pub fn pluralkit_id(&self) -> Option<&str> {
        self.content.pk_id.as_deref()
    }

    pub fn pronouns(&self) -> Option<&str> {
        self.content.pronouns.as_deref()
    }

    pub fn color(&self) -> Option<&str> {
        self.content.color.as_deref()
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.content.avatar_url.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.content.desc.as_deref()
    }

    /// Fixed list of fields rendered in logs.
    pub fn display_fields(&self) -> [(&'static str, Option<&str>); 8] {
        [
            ("id", Some(self.id())),
            ("name", self.name()),
            ("private", Some(if self.is_private() { "true" } else { "false" })),
            ("pk_id", self.pluralkit_id()),
            ("pronouns", self.pronouns()),
            ("color", self.color()),
            ("avatar_url", self.avatar_url()),
            ("description", self.description()),
        ]
    }
}

/// One entry of `GET /fronters`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct FrontEntry {
    #[serde(default)]
    pub content: FrontContent,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct FrontContent {
    pub member: Option<String>,
}
