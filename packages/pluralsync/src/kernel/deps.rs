//! Adapters from the service client crates to the kernel traits.

use anyhow::Result;
use async_trait::async_trait;
use pluralkit_client::PluralKitClient;
use simplyplural_client::SimplyPluralClient;
use std::sync::Arc;

use crate::config::Config;
use crate::kernel::{BaseMirrorService, BaseSourceService, MemberPatch, MirrorMember, SourceMember};

// =============================================================================
// SimplyPluralClient Adapter (implements BaseSourceService trait)
// =============================================================================

/// Wrapper around SimplyPluralClient that implements BaseSourceService trait
pub struct SimplyPluralAdapter(pub Arc<SimplyPluralClient>);

impl SimplyPluralAdapter {
    pub fn new(client: Arc<SimplyPluralClient>) -> Self {
        Self(client)
    }

    pub fn from_config(config: &Config) -> Self {
        let mut client = SimplyPluralClient::new(
            config.credentials.sp_token.clone(),
            config.credentials.sp_userid.clone(),
        );
        if let Some(url) = &config.simplyplural_base_url {
            client = client.with_base_url(url.clone());
        }
        Self::new(Arc::new(client))
    }
}

#[async_trait]
impl BaseSourceService for SimplyPluralAdapter {
    async fn list_members(&self) -> Result<Vec<SourceMember>> {
        Ok(self.0.list_members().await?.to_vec())
    }

    async fn list_current_fronters(&self) -> Result<Vec<String>> {
        Ok(self.0.list_current_fronters().await?)
    }
}

// =============================================================================
// PluralKitClient Adapter (implements BaseMirrorService trait)
// =============================================================================

/// Wrapper around PluralKitClient that implements BaseMirrorService trait
pub struct PluralKitAdapter(pub Arc<PluralKitClient>);

impl PluralKitAdapter {
    pub fn new(client: Arc<PluralKitClient>) -> Self {
        Self(client)
    }

    pub fn from_config(config: &Config) -> Self {
        let mut client = PluralKitClient::new(config.credentials.pk_token.clone());
        if let Some(url) = &config.pluralkit_base_url {
            client = client.with_base_url(url.clone());
        }
        Self::new(Arc::new(client))
    }
}

#[async_trait]
impl BaseMirrorService for PluralKitAdapter {
    async fn list_members(&self) -> Result<Vec<MirrorMember>> {
        Ok(self.0.list_members().await?.to_vec())
    }

    async fn list_current_fronters(&self) -> Result<Vec<String>> {
        Ok(self.0.list_current_fronters().await?)
    }

    async fn update_member(&self, patch: &MemberPatch) -> Result<()> {
        Ok(self.0.update_member(patch).await?)
    }

    async fn set_fronters(&self, member_ids: &[String]) -> Result<()> {
        Ok(self.0.set_fronters(member_ids).await?)
    }
}
