use crate::error::{RepositoryError, ServiceError};
use crate::repository::FundRepository;
use core_types::PublicFund;
use std::sync::Arc;

/// Use cases for funds.
#[derive(Clone)]
pub struct FundService {
    repo: Arc<dyn FundRepository>,
}

impl FundService {
    pub fn new(repo: Arc<dyn FundRepository>) -> Self {
        Self { repo }
    }

    /// Returns the fund for the given ISIN.
    pub async fn get_fund_by_isin(&self, isin: &str) -> Result<PublicFund, ServiceError> {
        let fund = self.repo.find_by_isin(isin).await.map_err(|e| match e {
            RepositoryError::NotFound => ServiceError::FundNotFound(isin.to_string()),
            other => ServiceError::Repository(other),
        })?;

        Ok(PublicFund::from(&fund))
    }

    /// Returns all funds, ordered by name.
    pub async fn get_funds(&self) -> Result<Vec<PublicFund>, ServiceError> {
        let funds = self.repo.find_all().await?;
        Ok(funds.iter().map(PublicFund::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryFundRepository;
    use chrono::NaiveDate;
    use core_types::Fund;

    fn fund(isin: &str, name: &str) -> Fund {
        Fund {
            isin: isin.to_string(),
            name: name.to_string(),
            bank: "Belfius".to_string(),
            launch_date: NaiveDate::from_ymd_opt(2001, 12, 24).unwrap(),
            currency: "EUR".to_string(),
        }
    }

    fn service(funds: Vec<Fund>) -> (FundService, Arc<InMemoryFundRepository>) {
        let repo = Arc::new(InMemoryFundRepository::new(funds));
        (FundService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn get_fund_by_isin_returns_public_fund() {
        let (service, _) = service(vec![fund("BE0026480963", "Pension Fund Growth")]);

        let public = service.get_fund_by_isin("BE0026480963").await.unwrap();

        assert_eq!(public.isin, "BE0026480963");
        assert_eq!(public.name, "Pension Fund Growth");
        assert_eq!(public.bank, "Belfius");
        assert_eq!(public.launch_date, "2001-12-24");
        assert_eq!(public.currency, "EUR");
    }

    #[tokio::test]
    async fn get_fund_by_isin_unknown_fund_is_fund_not_found() {
        let (service, _) = service(vec![fund("BE0026480963", "Pension Fund Growth")]);

        let err = service.get_fund_by_isin("LU0000000000").await.unwrap_err();

        assert!(matches!(err, ServiceError::FundNotFound(ref isin) if isin == "LU0000000000"));
    }

    #[tokio::test]
    async fn get_fund_by_isin_storage_failure_is_internal() {
        let (service, repo) = service(vec![fund("BE0026480963", "Pension Fund Growth")]);
        repo.set_unavailable(true);

        let err = service.get_fund_by_isin("BE0026480963").await.unwrap_err();

        assert!(matches!(err, ServiceError::Repository(RepositoryError::Storage(_))));
        assert!(err.is_internal());
    }

    #[tokio::test]
    async fn get_funds_is_ordered_by_name() {
        let (service, _) = service(vec![
            fund("BE0000000002", "Pension Fund Stability"),
            fund("BE0000000001", "Pension Fund Balanced"),
        ]);

        let funds = service.get_funds().await.unwrap();

        let names: Vec<_> = funds.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Pension Fund Balanced", "Pension Fund Stability"]);
    }

    #[tokio::test]
    async fn get_funds_empty_is_not_an_error() {
        let (service, _) = service(vec![]);

        assert!(service.get_funds().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_funds_propagates_storage_failure() {
        let (service, repo) = service(vec![fund("BE0000000001", "Pension Fund Balanced")]);
        repo.set_unavailable(true);

        assert!(service.get_funds().await.unwrap_err().is_internal());
    }

    #[tokio::test]
    async fn repeated_reads_are_identical() {
        let (service, _) = service(vec![fund("BE0026480963", "Pension Fund Growth")]);

        let first = service.get_fund_by_isin("BE0026480963").await.unwrap();
        let second = service.get_fund_by_isin("BE0026480963").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(service.get_funds().await.unwrap(), service.get_funds().await.unwrap());
    }
}
