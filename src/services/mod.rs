pub mod frame_service;
