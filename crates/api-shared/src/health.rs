use crate::dto::HealthRes;

/// Simple health service that reports liveness and whether the model is usable.
#[derive(Clone)]
pub struct HealthService;

impl HealthService {
    /// Creates a new instance of HealthService.
    pub fn new() -> Self {
        Self
    }

    /// Builds the health response.
    ///
    /// The service is alive even when the model is not loaded; `model_loaded` lets
    /// monitors tell the two apart.
    pub fn check_health(model_loaded: bool) -> HealthRes {
        HealthRes {
            ok: true,
            message: if model_loaded {
                "NeuralCare is alive".into()
            } else {
                "NeuralCare is alive but the prediction model is unavailable".into()
            },
            model_loaded,
        }
    }
}

impl Default for HealthService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_reports_model_state() {
        assert!(HealthService::check_health(true).model_loaded);
        let res = HealthService::check_health(false);
        assert!(res.ok);
        assert!(!res.model_loaded);
        assert!(res.message.contains("unavailable"));
    }
}
