mod export;
mod ports;
