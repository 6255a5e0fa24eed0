/**
 * This module contains all logic for loading textures from external files and
 * uploading them to the GPU.
 */
pub mod texture;
