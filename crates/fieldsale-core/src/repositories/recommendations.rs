//! Product-recommendation videos.

use crate::{ClientError, OperationSlot, ResultEnvelope};
use fieldsale_api::{CommerceApi, Confirmation, VideoUpload};
use std::future::Future;
use std::sync::Arc;
use tracing::info;

/// Uploads of recorded recommendation videos.
pub struct RecommendationRepository {
    api: Arc<dyn CommerceApi>,
    upload: OperationSlot<Confirmation>,
}

impl RecommendationRepository {
    pub fn new(api: Arc<dyn CommerceApi>) -> Self {
        Self {
            api,
            upload: OperationSlot::new("upload_recommendation_video"),
        }
    }

    /// Upload a product-recommendation video recorded for a customer.
    pub fn upload_video(
        &self,
        video: VideoUpload,
        customer_id: i64,
        seller_id: i64,
    ) -> impl Future<Output = ResultEnvelope<Confirmation>> + '_ {
        self.upload.run(async move {
            let size = video.bytes.len();
            self.api
                .upload_recommendation_video(video, customer_id, seller_id)
                .await
                .map_err(ClientError::from)
                .inspect(|_| {
                    info!(customer_id, seller_id, size, "Recommendation video uploaded")
                })
        })
    }

    pub fn upload_state(&self) -> &OperationSlot<Confirmation> {
        &self.upload
    }
}
