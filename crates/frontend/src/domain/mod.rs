pub mod c001_cabinet_type;
pub mod c002_hardware_brand;
pub mod c003_hardware_charge;
