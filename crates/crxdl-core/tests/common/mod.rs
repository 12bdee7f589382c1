pub mod crx_server;
