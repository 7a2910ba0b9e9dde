use rayon::prelude::*;

use crate::model::Resource;

/// Strip every field's metadata down to its description. Idempotent.
pub fn normalize(resources: Vec<Resource>) -> Vec<Resource> {
    resources.into_par_iter().map(normalize_one).collect()
}

fn normalize_one(mut resource: Resource) -> Resource {
    if let Some(details) = resource.details.as_mut() {
        for field in details.fields.values_mut() {
            if let Some(fd) = field.field_details.as_mut() {
                *fd = fd.pruned();
            }
        }
    }
    resource
}
