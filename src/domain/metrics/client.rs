//! Metrics sub-client: dashboard figures.

use super::{
    DailyReceipt, DayOrdersAmount, MonthCanceledOrdersAmount, MonthOrdersAmount, MonthReceipt,
    PopularProduct, ReceiptPeriod,
};
use crate::client::PizzaShopClient;
use crate::error::SdkError;
use crate::http::RetryPolicy;

use serde::de::DeserializeOwned;

pub struct Metrics<'a> {
    pub(crate) client: &'a PizzaShopClient,
}

impl<'a> Metrics<'a> {
    pub async fn month_receipt(&self) -> Result<MonthReceipt, SdkError> {
        self.fetch("/metrics/month-receipt").await
    }

    pub async fn month_orders_amount(&self) -> Result<MonthOrdersAmount, SdkError> {
        self.fetch("/metrics/month-orders-amount").await
    }

    pub async fn day_orders_amount(&self) -> Result<DayOrdersAmount, SdkError> {
        self.fetch("/metrics/day-orders-amount").await
    }

    pub async fn month_canceled_orders_amount(
        &self,
    ) -> Result<MonthCanceledOrdersAmount, SdkError> {
        self.fetch("/metrics/month-canceled-orders-amount").await
    }

    /// Daily receipt for the chart. The period is checked before any request.
    pub async fn daily_receipt_in_period(
        &self,
        period: &ReceiptPeriod,
    ) -> Result<Vec<DailyReceipt>, SdkError> {
        period.validate()?;
        self.fetch(&format!(
            "/metrics/daily-receipt-in-period?{}",
            period.to_query_string()
        ))
        .await
    }

    pub async fn popular_products(&self) -> Result<Vec<PopularProduct>, SdkError> {
        self.fetch("/metrics/popular-products").await
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, SdkError> {
        let url = self.client.http.url(path);
        Ok(self.client.http.get(&url, RetryPolicy::Idempotent).await?)
    }
}
