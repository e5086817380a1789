use crate::common::error::AutodeployError;

/// Result type used throughout the crate outside of the exit-code contract.
///
/// # Examples
///
/// ```
/// use git_autodeploy::common::result::AutodeployResult;
/// use git_autodeploy::common::error::AutodeployError;
///
/// fn example_function() -> AutodeployResult<String> {
///     Ok("success".to_string())
/// }
///
/// fn example_with_error() -> AutodeployResult<()> {
///     Err(AutodeployError::validation_error("url", "must not be empty", None))
/// }
/// ```
pub type AutodeployResult<T> = Result<T, AutodeployError>;

/// Conversion helpers from `Option` into [`AutodeployResult`].
pub trait OptionExt<T> {
    /// Convert `None` into a validation error for `field`.
    ///
    /// # Examples
    ///
    /// ```
    /// use git_autodeploy::common::result::{AutodeployResult, OptionExt};
    ///
    /// let none_value: Option<String> = None;
    /// let result: AutodeployResult<String> = none_value.ok_or_validation_error("path", "required");
    /// assert!(result.is_err());
    /// ```
    fn ok_or_validation_error(
        self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> AutodeployResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_validation_error(
        self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> AutodeployResult<T> {
        self.ok_or_else(|| AutodeployError::validation_error(field, message, None))
    }
}
