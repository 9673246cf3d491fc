pub mod exchange_host;
