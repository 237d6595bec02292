//! Use case implementations.

mod restore_session_use_case;
mod sign_in_use_case;
mod sign_out_use_case;
mod sign_up_use_case;

pub use restore_session_use_case::RestoreSessionUseCase;
pub use sign_in_use_case::SignInUseCase;
pub use sign_out_use_case::SignOutUseCase;
pub use sign_up_use_case::SignUpUseCase;
