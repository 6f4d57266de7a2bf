// TestDependencies - mock implementations for testing
//
// In-memory source and mirror services. The mirror mock applies patches and
// switches to its own state, so a second sync run sees the updated roster.

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::{BaseMirrorService, BaseSourceService, MemberPatch, MirrorMember, SourceMember};

/// Source member with the given id and name, public and existing.
pub fn source_member(id: &str, name: &str) -> SourceMember {
    let mut member = SourceMember {
        id: id.to_string(),
        exists: Some(true),
        ..Default::default()
    };
    member.content.name = Some(name.to_string());
    member.content.private = Some(false);
    member
}

/// Mirror member with the given short id and name, no display name.
pub fn mirror_member(id: &str, name: &str) -> MirrorMember {
    MirrorMember {
        id: id.to_string(),
        uuid: format!("uuid-{}", id),
        name: Some(name.to_string()),
        ..Default::default()
    }
}

// =============================================================================
// Mock Source Service
// =============================================================================

#[derive(Default)]
pub struct MockSourceService {
    members: Vec<SourceMember>,
    fronters: Vec<String>,
    fail_members: bool,
    fail_fronters: bool,
}

impl MockSourceService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_member(mut self, member: SourceMember) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_fronters(mut self, ids: &[&str]) -> Self {
        self.fronters = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    /// Make `list_members` fail
    pub fn failing_members(mut self) -> Self {
        self.fail_members = true;
        self
    }

    /// Make `list_current_fronters` fail
    pub fn failing_fronters(mut self) -> Self {
        self.fail_fronters = true;
        self
    }
}

#[async_trait]
impl BaseSourceService for MockSourceService {
    async fn list_members(&self) -> Result<Vec<SourceMember>> {
        if self.fail_members {
            bail!("mock source roster unavailable");
        }
        Ok(self.members.clone())
    }

    async fn list_current_fronters(&self) -> Result<Vec<String>> {
        if self.fail_fronters {
            bail!("mock source fronters unavailable");
        }
        Ok(self.fronters.clone())
    }
}

// =============================================================================
// Mock Mirror Service
// =============================================================================

pub struct MockMirrorService {
    members: Arc<Mutex<Vec<MirrorMember>>>,
    fronters: Arc<Mutex<Vec<String>>>,
    update_calls: Arc<Mutex<Vec<MemberPatch>>>,
    switch_calls: Arc<Mutex<Vec<Vec<String>>>>,
    failing_updates: Vec<String>,
    fail_switch: bool,
}

impl Default for MockMirrorService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMirrorService {
    pub fn new() -> Self {
        Self {
            members: Arc::new(Mutex::new(Vec::new())),
            fronters: Arc::new(Mutex::new(Vec::new())),
            update_calls: Arc::new(Mutex::new(Vec::new())),
            switch_calls: Arc::new(Mutex::new(Vec::new())),
            failing_updates: Vec::new(),
            fail_switch: false,
        }
    }

    pub fn with_member(self, member: MirrorMember) -> Self {
        self.members.lock().unwrap().push(member);
        self
    }

    pub fn with_fronters(self, ids: &[&str]) -> Self {
        *self.fronters.lock().unwrap() = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    /// Make updates of the member with this short id fail
    pub fn failing_update_for(mut self, member_id: &str) -> Self {
        self.failing_updates.push(member_id.to_string());
        self
    }

    /// Make `set_fronters` fail
    pub fn failing_switch(mut self) -> Self {
        self.fail_switch = true;
        self
    }

    /// All patches that were sent, in order (including failed ones)
    pub fn update_calls(&self) -> Vec<MemberPatch> {
        self.update_calls.lock().unwrap().clone()
    }

    /// All switches that were sent, in order
    pub fn switch_calls(&self) -> Vec<Vec<String>> {
        self.switch_calls.lock().unwrap().clone()
    }

    /// Current state of a member after applied patches
    pub fn member(&self, member_id: &str) -> Option<MirrorMember> {
        self.members
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == member_id)
            .cloned()
    }

    pub fn fronters(&self) -> Vec<String> {
        self.fronters.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseMirrorService for MockMirrorService {
    async fn list_members(&self) -> Result<Vec<MirrorMember>> {
        Ok(self.members.lock().unwrap().clone())
    }

    async fn list_current_fronters(&self) -> Result<Vec<String>> {
        Ok(self.fronters())
    }

    async fn update_member(&self, patch: &MemberPatch) -> Result<()> {
        // Record the call
        self.update_calls.lock().unwrap().push(patch.clone());

        if self.failing_updates.contains(&patch.id) {
            bail!("mock update rejected for {}", patch.id);
        }

        let mut members = self.members.lock().unwrap();
        let Some(member) = members.iter_mut().find(|m| m.id == patch.id) else {
            bail!("mock mirror has no member {}", patch.id);
        };
        member.color = patch.color.clone();
        if let Some(display_name) = &patch.display_name {
            member.display_name = Some(display_name.clone());
        }
        if let Some(pronouns) = &patch.pronouns {
            member.pronouns = Some(pronouns.clone());
        }
        if let Some(avatar_url) = &patch.avatar_url {
            member.avatar_url = Some(avatar_url.clone());
        }
        if let Some(description) = &patch.description {
            member.description = Some(description.clone());
        }
        Ok(())
    }

    async fn set_fronters(&self, member_ids: &[String]) -> Result<()> {
        self.switch_calls.lock().unwrap().push(member_ids.to_vec());

        if self.fail_switch {
            bail!("mock switch rejected");
        }

        *self.fronters.lock().unwrap() = member_ids.to_vec();
        Ok(())
    }
}
