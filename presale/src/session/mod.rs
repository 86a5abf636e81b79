pub mod gate;
pub mod notify;

pub use gate::{redirect_for, Area, GateState, Route, SessionGate};
pub use notify::{UserChange, UserChangeNotifier, UserChangeSubscription};
