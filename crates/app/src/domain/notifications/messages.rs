//! Notification wording for each event.

use crate::domain::{
    deliveries::records::DeliveryStatus, money::format_amount, orders::lifecycle::OrderStatus,
};

/// Title and body of a notification about to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Draft {
    pub(crate) title: String,
    pub(crate) message: String,
}

pub(crate) fn new_product(name: &str, price: u64) -> Draft {
    Draft {
        title: "New product available!".to_string(),
        message: format!("Discover our new product: {name} - {} €", format_amount(price)),
    }
}

pub(crate) fn promotion(name: &str, discount_percent: u8) -> Draft {
    Draft {
        title: "Special offer!".to_string(),
        message: format!("{discount_percent}% off {name}!"),
    }
}

pub(crate) fn stock_out(name: &str) -> Draft {
    Draft {
        title: "Product out of stock".to_string(),
        message: format!("{name} is temporarily unavailable."),
    }
}

pub(crate) fn order_status(order_number: &str, status: OrderStatus) -> Draft {
    let message = match status {
        OrderStatus::Pending => format!("Your order {order_number} has been received."),
        OrderStatus::Confirmed => format!("Your order {order_number} has been confirmed!"),
        OrderStatus::Processing => format!("Your order {order_number} is being processed."),
        OrderStatus::Shipped => format!("Your order {order_number} has been shipped!"),
        OrderStatus::Delivered => {
            format!("Your order {order_number} has been delivered successfully!")
        }
        OrderStatus::Cancelled => format!("Your order {order_number} has been cancelled."),
    };

    Draft {
        title: format!("Order {order_number} - {}", status.label()),
        message,
    }
}

pub(crate) fn delivery_status(status: DeliveryStatus) -> Draft {
    let message = match status {
        DeliveryStatus::Preparation => "Your order is being prepared.",
        DeliveryStatus::OnTheWay => "Your order is on its way to you!",
        DeliveryStatus::Delivered => "Your order has been delivered successfully!",
    };

    Draft {
        title: format!("Delivery - {}", status.label()),
        message: message.to_string(),
    }
}
