//! Session-validity classification for auth-check failures.
//!
//! A token-validity probe can fail for reasons that say nothing about
//! the token itself (the backend is down) or for reasons that say
//! everything (401). The two policies below make the ambiguous 5xx
//! case an explicit choice: trusting the existing session keeps users
//! logged in through backend flakiness, expiring it favors security
//! over availability. Network-unreachable expires the session under
//! both policies.

use std::sync::Arc;

use crate::error::FetchError;

/// Callback invoked when a fetch settles with an authentication failure.
///
/// Injected at coordinator construction so auth handling stays an
/// explicit dependency rather than process-wide shared state.
pub type AuthEventSink = Arc<dyn Fn(&FetchError) + Send + Sync>;

/// How to treat an ambiguous (server-error) auth-check failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCheckPolicy {
	/// A 5xx on the auth check leaves the session valid.
	TrustOnServerError,
	/// Any failed auth check expires the session.
	ExpireOnAmbiguous,
}

/// Outcome of classifying an auth-check result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionVerdict {
	/// The stored session is still usable.
	StillValid,
	/// The stored session must be cleared.
	Expired,
}

/// Classifies an auth-check result under the given policy.
pub fn classify_session_check<T>(
	result: &Result<T, FetchError>,
	policy: SessionCheckPolicy,
) -> SessionVerdict {
	match result {
		Ok(_) => SessionVerdict::StillValid,
		Err(err) if err.is_auth() => SessionVerdict::Expired,
		Err(err) if err.is_server_error() => match policy {
			SessionCheckPolicy::TrustOnServerError => SessionVerdict::StillValid,
			SessionCheckPolicy::ExpireOnAmbiguous => SessionVerdict::Expired,
		},
		Err(_) => SessionVerdict::Expired,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn http(status: u16) -> Result<(), FetchError> {
		Err(FetchError::Http {
			status,
			message: "check failed".to_string(),
		})
	}

	#[test]
	fn success_is_valid_under_both_policies() {
		let ok: Result<(), FetchError> = Ok(());
		assert_eq!(
			classify_session_check(&ok, SessionCheckPolicy::TrustOnServerError),
			SessionVerdict::StillValid
		);
		assert_eq!(
			classify_session_check(&ok, SessionCheckPolicy::ExpireOnAmbiguous),
			SessionVerdict::StillValid
		);
	}

	#[test]
	fn unauthorized_expires_under_both_policies() {
		assert_eq!(
			classify_session_check(&http(401), SessionCheckPolicy::TrustOnServerError),
			SessionVerdict::Expired
		);
		assert_eq!(
			classify_session_check(&http(401), SessionCheckPolicy::ExpireOnAmbiguous),
			SessionVerdict::Expired
		);
	}

	#[test]
	fn server_error_depends_on_policy() {
		assert_eq!(
			classify_session_check(&http(502), SessionCheckPolicy::TrustOnServerError),
			SessionVerdict::StillValid
		);
		assert_eq!(
			classify_session_check(&http(502), SessionCheckPolicy::ExpireOnAmbiguous),
			SessionVerdict::Expired
		);
	}

	#[test]
	fn network_unreachable_expires_under_both_policies() {
		let offline: Result<(), FetchError> = Err(FetchError::Transport("unreachable".to_string()));
		assert_eq!(
			classify_session_check(&offline, SessionCheckPolicy::TrustOnServerError),
			SessionVerdict::Expired
		);
		assert_eq!(
			classify_session_check(&offline, SessionCheckPolicy::ExpireOnAmbiguous),
			SessionVerdict::Expired
		);
	}
}
