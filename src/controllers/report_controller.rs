use sqlx::PgPool;

use crate::dto::ApiResponse;
use crate::models::report::{
    CustomerHistory, DriverAverageRating, LocationActivity, RevenueByMethod, TopDriver,
};
use crate::models::Customer;
use crate::repositories::crud_repository::not_found_message;
use crate::repositories::report_repository::ReportRepository;
use crate::utils::errors::{not_found_error, AppResult};

pub struct ReportController {
    repository: ReportRepository,
}

impl ReportController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ReportRepository::new(pool),
        }
    }

    pub async fn top_drivers(&self) -> AppResult<ApiResponse<Vec<TopDriver>>> {
        Ok(ApiResponse::success(self.repository.top_drivers().await?))
    }

    pub async fn revenue_by_method(&self) -> AppResult<ApiResponse<Vec<RevenueByMethod>>> {
        Ok(ApiResponse::success(
            self.repository.revenue_by_method().await?,
        ))
    }

    pub async fn average_ratings(&self) -> AppResult<ApiResponse<Vec<DriverAverageRating>>> {
        Ok(ApiResponse::success(self.repository.average_ratings().await?))
    }

    pub async fn rides_by_location(&self) -> AppResult<ApiResponse<Vec<LocationActivity>>> {
        Ok(ApiResponse::success(
            self.repository.rides_by_location().await?,
        ))
    }

    /// Historial de un customer; un customer inexistente es 404
    pub async fn customer_history(&self, customer_id: i64) -> AppResult<CustomerHistory> {
        if !self.repository.customer_exists(customer_id).await? {
            return Err(not_found_error(not_found_message::<Customer>(&customer_id)));
        }
        let rides = self.repository.customer_history(customer_id).await?;
        Ok(CustomerHistory::new(customer_id, rides))
    }
}
