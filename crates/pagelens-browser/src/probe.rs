use crate::scripts;
use async_trait::async_trait;
use chromiumoxide::page::Page;
use pagelens_core::snapshot::{
    CtaSnapshot, FontSnapshot, ImageSnapshot, LayoutSnapshot, PageProbe, SelectorGroup,
    SocialProofSnapshot,
};
use pagelens_core::{Error, Result};
use serde::de::DeserializeOwned;

/// Collects snapshots from one navigated Chrome page
#[derive(Debug, Clone)]
pub struct ChromePage {
    page: Page,
}

impl ChromePage {
    pub(crate) fn new(page: Page) -> Self {
        Self { page }
    }

    async fn collect<T: DeserializeOwned>(&self, what: &str, script: String) -> Result<T> {
        tracing::debug!("Collecting {} snapshot", what);
        let evaluated = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| Error::Collection(format!("{} script failed: {}", what, e)))?;

        evaluated
            .into_value::<T>()
            .map_err(|e| Error::Collection(format!("{} script returned unexpected data: {}", what, e)))
    }
}

#[async_trait]
impl PageProbe for ChromePage {
    async fn fonts(&self) -> Result<FontSnapshot> {
        self.collect("font", scripts::FONTS.to_string()).await
    }

    async fn images(&self) -> Result<ImageSnapshot> {
        self.collect("image", scripts::IMAGES.to_string()).await
    }

    async fn ctas(&self, selectors: &[&'static str]) -> Result<CtaSnapshot> {
        self.collect("CTA", scripts::cta(selectors)?).await
    }

    async fn layout(&self) -> Result<LayoutSnapshot> {
        self.collect("layout", scripts::LAYOUT.to_string()).await
    }

    async fn social_proof(&self, groups: &[SelectorGroup]) -> Result<SocialProofSnapshot> {
        self.collect("social proof", scripts::social_proof(groups)?).await
    }
}
