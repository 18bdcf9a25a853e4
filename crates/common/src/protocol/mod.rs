// Wire-level contract between the taskboard server and its clients.

pub mod http;
