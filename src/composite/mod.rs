pub(crate) mod occlusion;
