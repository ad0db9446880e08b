//! `reference/*` dictionaries.
//!
//! Every dictionary shares one shape: GET lists it and POST
//! `{code}/edit` creates or updates one entry, with the entry JSON-encoded
//! in a dictionary-specific form field. [`Reference`] is the table that
//! drives both operations.

use serde::Serialize;

use super::{identifier, to_json, to_value};
use crate::client::RetailCrm;
use crate::error::{ApiError, Result};
use crate::request::Endpoint;
use crate::response::Response;
use crate::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reference {
    DeliveryServices,
    DeliveryTypes,
    OrderMethods,
    OrderTypes,
    PaymentStatuses,
    PaymentTypes,
    ProductStatuses,
    Sites,
    StatusGroups,
    Statuses,
    Stores,
    Countries,
}

impl Reference {
    pub const ALL: [Reference; 12] = [
        Reference::DeliveryServices,
        Reference::DeliveryTypes,
        Reference::OrderMethods,
        Reference::OrderTypes,
        Reference::PaymentStatuses,
        Reference::PaymentTypes,
        Reference::ProductStatuses,
        Reference::Sites,
        Reference::StatusGroups,
        Reference::Statuses,
        Reference::Stores,
        Reference::Countries,
    ];

    /// Path segment under `reference/`.
    pub fn segment(self) -> &'static str {
        match self {
            Reference::DeliveryServices => "delivery-services",
            Reference::DeliveryTypes => "delivery-types",
            Reference::OrderMethods => "order-methods",
            Reference::OrderTypes => "order-types",
            Reference::PaymentStatuses => "payment-statuses",
            Reference::PaymentTypes => "payment-types",
            Reference::ProductStatuses => "product-statuses",
            Reference::Sites => "sites",
            Reference::StatusGroups => "status-groups",
            Reference::Statuses => "statuses",
            Reference::Stores => "stores",
            Reference::Countries => "countries",
        }
    }

    /// Form field carrying an edited entry; `None` for read-only dictionaries.
    pub fn edit_field(self) -> Option<&'static str> {
        match self {
            Reference::DeliveryServices => Some("deliveryService"),
            Reference::DeliveryTypes => Some("deliveryType"),
            Reference::OrderMethods => Some("orderMethod"),
            Reference::OrderTypes => Some("orderType"),
            Reference::PaymentStatuses => Some("paymentStatus"),
            Reference::PaymentTypes => Some("paymentType"),
            Reference::ProductStatuses => Some("productStatus"),
            Reference::Sites => Some("site"),
            Reference::Statuses => Some("status"),
            Reference::Stores => Some("store"),
            Reference::StatusGroups | Reference::Countries => None,
        }
    }
}

pub fn list(reference: Reference) -> Endpoint {
    Endpoint::get(format!("reference/{}", reference.segment()))
}

/// The path code is read from `entry["code"]`.
pub fn edit<T: Serialize + ?Sized>(reference: Reference, entry: &T) -> Result<Endpoint> {
    let field = reference.edit_field().ok_or_else(|| {
        ApiError::InvalidRequest(format!("reference/{} is read-only", reference.segment()))
    })?;
    let entry = to_value(entry)?;
    let code = identifier(&entry, "code")?;
    Ok(
        Endpoint::post(format!("reference/{}/{code}/edit", reference.segment()))
            .param(field, to_json(&entry)?),
    )
}

impl<T: Transport> RetailCrm<T> {
    pub fn reference(&self, reference: Reference) -> Result<Response> {
        self.send(list(reference))
    }

    pub fn reference_edit<E: Serialize + ?Sized>(
        &self,
        reference: Reference,
        entry: &E,
    ) -> Result<Response> {
        self.send(edit(reference, entry)?)
    }

    pub fn delivery_services(&self) -> Result<Response> {
        self.reference(Reference::DeliveryServices)
    }

    pub fn delivery_services_edit<E: Serialize + ?Sized>(&self, service: &E) -> Result<Response> {
        self.reference_edit(Reference::DeliveryServices, service)
    }

    pub fn delivery_types(&self) -> Result<Response> {
        self.reference(Reference::DeliveryTypes)
    }

    pub fn delivery_types_edit<E: Serialize + ?Sized>(&self, delivery_type: &E) -> Result<Response> {
        self.reference_edit(Reference::DeliveryTypes, delivery_type)
    }

    pub fn order_methods(&self) -> Result<Response> {
        self.reference(Reference::OrderMethods)
    }

    pub fn order_methods_edit<E: Serialize + ?Sized>(&self, method: &E) -> Result<Response> {
        self.reference_edit(Reference::OrderMethods, method)
    }

    pub fn order_types(&self) -> Result<Response> {
        self.reference(Reference::OrderTypes)
    }

    pub fn order_types_edit<E: Serialize + ?Sized>(&self, order_type: &E) -> Result<Response> {
        self.reference_edit(Reference::OrderTypes, order_type)
    }

    pub fn payment_statuses(&self) -> Result<Response> {
        self.reference(Reference::PaymentStatuses)
    }

    pub fn payment_statuses_edit<E: Serialize + ?Sized>(&self, status: &E) -> Result<Response> {
        self.reference_edit(Reference::PaymentStatuses, status)
    }

    pub fn payment_types(&self) -> Result<Response> {
        self.reference(Reference::PaymentTypes)
    }

    pub fn payment_types_edit<E: Serialize + ?Sized>(&self, payment_type: &E) -> Result<Response> {
        self.reference_edit(Reference::PaymentTypes, payment_type)
    }

    pub fn product_statuses(&self) -> Result<Response> {
        self.reference(Reference::ProductStatuses)
    }

    pub fn product_statuses_edit<E: Serialize + ?Sized>(&self, status: &E) -> Result<Response> {
        self.reference_edit(Reference::ProductStatuses, status)
    }

    pub fn sites(&self) -> Result<Response> {
        self.reference(Reference::Sites)
    }

    pub fn sites_edit<E: Serialize + ?Sized>(&self, site: &E) -> Result<Response> {
        self.reference_edit(Reference::Sites, site)
    }

    pub fn status_groups(&self) -> Result<Response> {
        self.reference(Reference::StatusGroups)
    }

    pub fn statuses(&self) -> Result<Response> {
        self.reference(Reference::Statuses)
    }

    pub fn statuses_edit<E: Serialize + ?Sized>(&self, status: &E) -> Result<Response> {
        self.reference_edit(Reference::Statuses, status)
    }

    pub fn stores(&self) -> Result<Response> {
        self.reference(Reference::Stores)
    }

    pub fn stores_edit<E: Serialize + ?Sized>(&self, store: &E) -> Result<Response> {
        self.reference_edit(Reference::Stores, store)
    }

    pub fn countries(&self) -> Result<Response> {
        self.reference(Reference::Countries)
    }
}
