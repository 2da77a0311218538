pub mod phantom;

pub use self::phantom::{PhantomProvider, SolanaPublicKey};
