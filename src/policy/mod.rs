pub mod write_order;
