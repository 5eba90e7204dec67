//! Provider ports: inventory listing and power commands per resource kind.
//!
//! Each provider lists its resources in its own shape; the domain turns the
//! listings into a [`ResourceSnapshot`](offhours_domain::resource::ResourceSnapshot).

use std::future::Future;

use offhours_domain::error::OffhoursError;
use offhours_domain::resource::{Ec2Instance, LightsailResource};

/// EC2-style provider: instances addressed by instance id.
pub trait Ec2Provider {
    /// List every instance visible to this handle.
    fn describe_instances(
        &self,
    ) -> impl Future<Output = Result<Vec<Ec2Instance>, OffhoursError>> + Send;

    /// Request that the instance starts. Returns once the provider accepted the call.
    fn start_instance(
        &self,
        instance_id: &str,
    ) -> impl Future<Output = Result<(), OffhoursError>> + Send;

    /// Request that the instance stops. Returns once the provider accepted the call.
    fn stop_instance(
        &self,
        instance_id: &str,
    ) -> impl Future<Output = Result<(), OffhoursError>> + Send;
}

/// Lightsail-style provider: instances addressed by name, listed alongside
/// non-instance resources.
pub trait LightsailProvider {
    /// List every resource visible to this handle, instances or not.
    fn get_resources(
        &self,
    ) -> impl Future<Output = Result<Vec<LightsailResource>, OffhoursError>> + Send;

    fn start_instance(
        &self,
        instance_name: &str,
    ) -> impl Future<Output = Result<(), OffhoursError>> + Send;

    fn stop_instance(
        &self,
        instance_name: &str,
    ) -> impl Future<Output = Result<(), OffhoursError>> + Send;
}

impl<T: Ec2Provider + Send + Sync> Ec2Provider for std::sync::Arc<T> {
    fn describe_instances(
        &self,
    ) -> impl Future<Output = Result<Vec<Ec2Instance>, OffhoursError>> + Send {
        (**self).describe_instances()
    }

    fn start_instance(
        &self,
        instance_id: &str,
    ) -> impl Future<Output = Result<(), OffhoursError>> + Send {
        (**self).start_instance(instance_id)
    }

    fn stop_instance(
        &self,
        instance_id: &str,
    ) -> impl Future<Output = Result<(), OffhoursError>> + Send {
        (**self).stop_instance(instance_id)
    }
}

impl<T: LightsailProvider + Send + Sync> LightsailProvider for std::sync::Arc<T> {
    fn get_resources(
        &self,
    ) -> impl Future<Output = Result<Vec<LightsailResource>, OffhoursError>> + Send {
        (**self).get_resources()
    }

    fn start_instance(
        &self,
        instance_name: &str,
    ) -> impl Future<Output = Result<(), OffhoursError>> + Send {
        (**self).start_instance(instance_name)
    }

    fn stop_instance(
        &self,
        instance_name: &str,
    ) -> impl Future<Output = Result<(), OffhoursError>> + Send {
        (**self).stop_instance(instance_name)
    }
}
