use super::models::AvailabilityZone;
use super::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    pub async fn get_availability_zone_by_id(
        &self,
        id: &str,
    ) -> Result<AvailabilityZone, ClientError> {
        self.get_json(&format!("availability-zones/{id}")).await
    }
}
