pub mod molecules;
