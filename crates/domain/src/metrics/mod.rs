pub mod fees;
pub mod impermanent_loss;
pub mod volatility;
