pub mod attach_image;
